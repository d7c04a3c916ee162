use serde::{Deserialize, Serialize};

/// Kind of activity an entry opens. The segment between an entry and the
/// next one inherits the mode of the entry that starts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLogMode {
    /// Normal, counted work.
    #[default]
    Normal,
    /// Rest time. Not counted.
    Break,
    /// End of the working day.
    Quit,
    /// An automated export ran during this segment.
    Export,
    /// Like a break, but counted (e.g. half a day off).
    OffTime,
}

#[derive(Debug, Clone, Copy)]
struct ModeTraits {
    counted: bool,
    pause_if_preceding: bool,
    exported: bool,
}

// Indexed by discriminant, keep in declaration order.
const MODE_TABLE: [ModeTraits; 5] = [
    // Normal
    ModeTraits {
        counted: true,
        pause_if_preceding: false,
        exported: true,
    },
    // Break
    ModeTraits {
        counted: false,
        pause_if_preceding: true,
        exported: false,
    },
    // Quit
    ModeTraits {
        counted: true,
        pause_if_preceding: false,
        exported: false,
    },
    // Export
    ModeTraits {
        counted: true,
        pause_if_preceding: false,
        exported: true,
    },
    // OffTime
    ModeTraits {
        counted: true,
        pause_if_preceding: false,
        exported: false,
    },
];

impl TimeLogMode {
    pub const ALL: [TimeLogMode; 5] = [
        TimeLogMode::Normal,
        TimeLogMode::Break,
        TimeLogMode::Quit,
        TimeLogMode::Export,
        TimeLogMode::OffTime,
    ];

    fn traits(self) -> ModeTraits {
        MODE_TABLE[self as usize]
    }

    /// Whether the segment started by this entry counts as worked time.
    pub fn is_counted(self) -> bool {
        self.traits().counted
    }

    /// Whether the gap following an entry of this mode is break time.
    pub fn contributes_pause_if_preceding(self) -> bool {
        self.traits().pause_if_preceding
    }

    /// Whether entries of this mode are written by the exporters.
    pub fn is_exported(self) -> bool {
        self.traits().exported
    }

    /// Convert enum → DB string
    pub fn to_db_str(self) -> &'static str {
        match self {
            TimeLogMode::Normal => "normal",
            TimeLogMode::Break => "break",
            TimeLogMode::Quit => "quit",
            TimeLogMode::Export => "export",
            TimeLogMode::OffTime => "offtime",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(TimeLogMode::Normal),
            "break" => Some(TimeLogMode::Break),
            "quit" => Some(TimeLogMode::Quit),
            "export" => Some(TimeLogMode::Export),
            "offtime" => Some(TimeLogMode::OffTime),
            _ => None,
        }
    }

    /// Lenient parser for CLI input ("Break", "pause", "off-time", ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "n" | "normal" | "work" => Some(TimeLogMode::Normal),
            "b" | "break" | "pause" => Some(TimeLogMode::Break),
            "q" | "quit" | "end" => Some(TimeLogMode::Quit),
            "e" | "export" => Some(TimeLogMode::Export),
            "o" | "offtime" | "off-time" | "off" => Some(TimeLogMode::OffTime),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeLogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_break_is_uncounted_and_pauses() {
        for mode in TimeLogMode::ALL {
            let is_break = mode == TimeLogMode::Break;
            assert_eq!(mode.is_counted(), !is_break, "{mode}");
            assert_eq!(mode.contributes_pause_if_preceding(), is_break, "{mode}");
        }
    }

    #[test]
    fn db_strings_are_stable() {
        for mode in TimeLogMode::ALL {
            assert_eq!(TimeLogMode::from_db_str(mode.to_db_str()), Some(mode));
        }
        assert_eq!(TimeLogMode::from_code("Pause"), Some(TimeLogMode::Break));
        assert_eq!(TimeLogMode::from_code("lunch"), None);
    }
}
