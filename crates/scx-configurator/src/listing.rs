use std::sync::LazyLock;

use regex::Regex;

// `scxctl list` embeds the ids in a bracketed, quoted list, e.g.:
//   supported schedulers: ["bpfland", "flash", "cosmos"]
// The bracketed region may span lines.
static SUPPORTED_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)supported schedulers: \[(.*?)\]").expect("list pattern must compile")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*?)""#).expect("quoted-token pattern must compile"));

/// Pull the scheduler ids out of raw `list` output, in the order the manager
/// printed them. No bracketed region yields an empty vector; callers decide
/// whether that is fatal.
pub fn extract_schedulers(output: &str) -> Vec<String> {
    let Some(caps) = SUPPORTED_LIST.captures(output) else {
        return Vec::new();
    };
    let inner = caps.get(1).map_or("", |m| m.as_str());
    QUOTED
        .captures_iter(inner)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
