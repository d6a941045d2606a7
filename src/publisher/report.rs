//! Per-locale results of a bulk run.

use crate::error::PublishError;
use crate::processor::FileReport;

/// Result for one locale. A failed locale does not affect the others.
#[derive(Debug)]
pub struct LocaleReport<T> {
    pub locale: String,
    pub result: Result<Vec<T>, PublishError>,
}

/// Results of a bulk operation, in the order the locales were processed.
#[derive(Debug)]
pub struct Report<T> {
    pub locales: Vec<LocaleReport<T>>,
}

/// Files published per locale.
pub type PublishReport = Report<FileReport>;

/// Files removed per locale.
pub type UninstallReport = Report<std::path::PathBuf>;

impl<T> Default for Report<T> {
    fn default() -> Self {
        Self { locales: Vec::new() }
    }
}

impl<T> Report<T> {
    pub(crate) fn push(&mut self, locale: impl Into<String>, result: Result<Vec<T>, PublishError>) {
        self.locales.push(LocaleReport { locale: locale.into(), result });
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.locales.iter().all(|report| report.result.is_ok())
    }

    /// Errors of the locales that failed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &PublishError)> {
        self.locales.iter().filter_map(|report| match &report.result {
            Ok(_) => None,
            Err(err) => Some((report.locale.as_str(), err)),
        })
    }

    /// Items from every successful locale.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.locales.iter().filter_map(|report| report.result.as_ref().ok()).flatten()
    }

    /// Collapses the report, returning the first locale error if any.
    ///
    /// # Errors
    /// The error of the first failed locale.
    pub fn into_result(self) -> Result<Vec<T>, PublishError> {
        let mut items = Vec::new();
        for report in self.locales {
            items.extend(report.result?);
        }
        Ok(items)
    }
}
