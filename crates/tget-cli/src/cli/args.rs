//! Speed-limit argument handling. Bad input is never fatal.

/// Where the effective limit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    Argument,
    /// No argument given.
    Default,
    /// Argument given but not an integer.
    InvalidArgument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedLimit {
    /// KB/s; zero or negative disables the cap.
    pub kbps: i64,
    pub source: LimitSource,
}

impl SpeedLimit {
    /// Line to show the user when the argument was not used as given.
    pub fn notice(&self) -> Option<String> {
        match self.source {
            LimitSource::Argument if self.kbps <= 0 => {
                Some("Speed limit disabled.".to_string())
            }
            LimitSource::Argument => None,
            LimitSource::Default => Some(format!(
                "Setting speed limit to default value ({} KB/s).",
                self.kbps
            )),
            LimitSource::InvalidArgument => Some(format!(
                "Invalid speed limit input. Setting speed limit to default value ({} KB/s).",
                self.kbps
            )),
        }
    }
}

pub fn resolve_speed_limit(arg: Option<&str>, default_kbps: i64) -> SpeedLimit {
    match arg.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(kbps)) => SpeedLimit {
            kbps,
            source: LimitSource::Argument,
        },
        Some(Err(_)) => SpeedLimit {
            kbps: default_kbps,
            source: LimitSource::InvalidArgument,
        },
        None => SpeedLimit {
            kbps: default_kbps,
            source: LimitSource::Default,
        },
    }
}
