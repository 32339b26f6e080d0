/// Configuration for combined detection.
///
/// Controls which signals [`Detector::detect`](super::Detector::detect) takes
/// into account. The single-signal entry points (`detect_content`,
/// `detect_extension`, ...) are not affected.
///
/// # Examples
///
/// ```rust
/// use typesniff::DetectOptions;
///
/// // Create with defaults: every signal on
/// let options = DetectOptions::default();
/// assert!(options.use_content && options.use_declared && options.use_extension);
///
/// // Or customize
/// let options = DetectOptions::new()
///     .with_declared(false)
///     .with_ignore_unspecified(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectOptions {
    /// Whether to match magic patterns against the content
    pub use_content: bool,
    /// Whether to consider the declared media type
    pub use_declared: bool,
    /// Whether to consider the file name extension
    pub use_extension: bool,
    /// Whether a declared `application/octet-stream` counts as no declaration
    pub ignore_unspecified: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            use_content: true,
            use_declared: true,
            use_extension: true,
            ignore_unspecified: true,
        }
    }
}

impl DetectOptions {
    /// Create a new `DetectOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_content(mut self, enabled: bool) -> Self {
        self.use_content = enabled;
        self
    }

    #[inline]
    pub fn with_declared(mut self, enabled: bool) -> Self {
        self.use_declared = enabled;
        self
    }

    #[inline]
    pub fn with_extension(mut self, enabled: bool) -> Self {
        self.use_extension = enabled;
        self
    }

    /// Set whether the generic binary type is discarded when declared.
    ///
    /// When disabled, a declared `application/octet-stream` competes like any
    /// other label.
    #[inline]
    pub fn with_ignore_unspecified(mut self, ignore: bool) -> Self {
        self.ignore_unspecified = ignore;
        self
    }

    /// Load options from a YAML document. Missing fields keep their defaults.
    ///
    /// ```rust
    /// use typesniff::DetectOptions;
    ///
    /// let options = DetectOptions::from_yaml("use_declared: false\n")?;
    /// assert!(!options.use_declared);
    /// assert!(options.use_content);
    /// # Ok::<(), typesniff::Error>(())
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| {
            crate::Error::Config(format!("Failed to parse detection options: {}", e))
        })
    }
}
