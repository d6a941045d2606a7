//! Immutable description of one file to publish.

/// Everything needed to publish a single translation file.
///
/// Built once, then handed to [`super::Processor::publish`]:
///
/// ```
/// use lang_publisher::processor::PublishRequest;
///
/// let request = PublishRequest::new("laravel-lang/lang", "de", "auth.json")
///     .with_force(true)
///     .with_inline(true);
///
/// assert_eq!(request.target_filename(), "auth.json");
/// assert!(request.force());
/// assert!(!request.full());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    package: String,
    locale: String,
    source_filename: String,
    target_filename: String,
    /// Re-process files whose target already exists
    force: bool,
    /// Replace the target with the source instead of merging
    full: bool,
    /// Prefer the `-inline` variant of the source file
    inline: bool,
}

impl PublishRequest {
    /// The target filename defaults to the source filename.
    #[must_use]
    pub fn new(
        package: impl Into<String>,
        locale: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        Self {
            package: package.into(),
            locale: locale.into(),
            target_filename: filename.clone(),
            source_filename: filename,
            force: false,
            full: false,
            inline: false,
        }
    }

    #[must_use]
    pub fn with_target_filename(self, target_filename: impl Into<String>) -> Self {
        Self { target_filename: target_filename.into(), ..self }
    }

    #[must_use]
    pub fn with_force(self, force: bool) -> Self {
        Self { force, ..self }
    }

    #[must_use]
    pub fn with_full(self, full: bool) -> Self {
        Self { full, ..self }
    }

    #[must_use]
    pub fn with_inline(self, inline: bool) -> Self {
        Self { inline, ..self }
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn source_filename(&self) -> &str {
        &self.source_filename
    }

    #[must_use]
    pub fn target_filename(&self) -> &str {
        &self.target_filename
    }

    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }

    #[must_use]
    pub const fn full(&self) -> bool {
        self.full
    }

    #[must_use]
    pub const fn inline(&self) -> bool {
        self.inline
    }
}
