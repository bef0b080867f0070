//! Preset time buttons

/// A fixed amount of time added by one preset control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetDefinition {
    pub label: &'static str,
    pub seconds_delta: u64,
    pub key: char,
}

/// The preset controls, in display order
pub const PRESETS: [PresetDefinition; 4] = [
    PresetDefinition { label: "1 min", seconds_delta: 60, key: '1' },
    PresetDefinition { label: "3 min", seconds_delta: 180, key: '3' },
    PresetDefinition { label: "5 min", seconds_delta: 300, key: '5' },
    PresetDefinition { label: "1 sec", seconds_delta: 1, key: 's' },
];

/// Look up a preset by its position in [`PRESETS`]
pub fn preset(index: usize) -> Option<&'static PresetDefinition> {
    PRESETS.get(index)
}

/// Find the preset bound to a key
pub fn preset_index_for_key(key: char) -> Option<usize> {
    PRESETS.iter().position(|p| p.key == key)
}

/// Find a preset by label ("3 min") or key ("3"), ignoring case and surrounding spaces
pub fn preset_index_for_name(name: &str) -> Option<usize> {
    let name = name.trim();
    PRESETS.iter().position(|p| {
        p.label.eq_ignore_ascii_case(name)
            || p.label.replace(' ', "").eq_ignore_ascii_case(name)
            || (name.chars().count() == 1
                && name.chars().all(|c| c.eq_ignore_ascii_case(&p.key)))
    })
}
