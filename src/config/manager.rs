//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    PublisherSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: PublisherSettings,

    /// ワークスペースのルートパス
    workspace_root: PathBuf,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { current_settings: PublisherSettings::default(), workspace_root }
    }

    /// 設定を読み込む
    ///
    /// `config_path` が指定されていればそのファイルを、なければ
    /// ワークスペース直下の `.lang-publisher.json` を読み込む。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_path: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!(workspace_root = %self.workspace_root.display(), "Loading settings");

        let loaded = match config_path {
            Some(path) => {
                // 明示的に指定されたファイルは存在しなければエラー
                if !path.exists() {
                    return Err(ConfigError::IoError(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} does not exist", path.display()),
                    )));
                }
                loader::load_from_file(path)?
            }
            None => loader::load_from_workspace(&self.workspace_root)?,
        };

        let settings = loaded.unwrap_or_default();

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &PublisherSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}
