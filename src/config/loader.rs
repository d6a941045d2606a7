//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    PublisherSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".lang-publisher.json";

/// ワークスペースから設定を読み込む
///
/// `.lang-publisher.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<PublisherSettings>, ConfigError> {
    load_from_file(&workspace_root.join(CONFIG_FILE_NAME))
}

/// 指定パスの設定ファイルを読み込む
pub(super) fn load_from_file(config_path: &Path) -> Result<Option<PublisherSettings>, ConfigError> {
    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: PublisherSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
