//! Runtime configuration.

/// Default cap on the length of an array literal.
pub const DEFAULT_MAX_LITERAL_LEN: usize = 1 << 24;

/// Tunable limits and policies of a [`crate::Runtime`].
///
/// Built with `Default` plus `with_*` methods, or read from the
/// environment with [`RuntimeConfig::from_env`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Largest length an inferred-length (`[]T`) literal may produce. An
    /// index key at or past this is an error rather than a huge allocation.
    /// Fixed-length arrays are bounded by their declared length instead.
    pub max_literal_len: usize,
    /// Clamp finite float32 conversions that overflow to `±f32::MAX`
    /// instead of producing infinity.
    pub saturate_float32: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_literal_len: DEFAULT_MAX_LITERAL_LEN,
            saturate_float32: true,
        }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn with_max_literal_len(mut self, len: usize) -> Self {
        self.max_literal_len = len;
        self
    }

    #[must_use]
    pub fn with_float32_saturation(mut self, saturate: bool) -> Self {
        self.saturate_float32 = saturate;
        self
    }

    /// Defaults overridden by `TERN_MAX_LITERAL_LEN` and
    /// `TERN_FLOAT32_SATURATE` (`0` or `false` turns saturation off).
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`RuntimeConfig::from_env`], reading variables through `var`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = RuntimeConfig::default();

        if let Some(raw) = var("TERN_MAX_LITERAL_LEN") {
            match raw.trim().parse::<usize>() {
                Ok(len) => config.max_literal_len = len,
                Err(err) => tracing::warn!(
                    value = %raw,
                    %err,
                    "ignoring invalid TERN_MAX_LITERAL_LEN"
                ),
            }
        }

        if let Some(raw) = var("TERN_FLOAT32_SATURATE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" | "no" => config.saturate_float32 = false,
                "1" | "true" | "on" | "yes" => config.saturate_float32 = true,
                other => tracing::warn!(value = other, "ignoring invalid TERN_FLOAT32_SATURATE"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests;
