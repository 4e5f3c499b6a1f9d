use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct ConfigFile {
    pub(crate) changelog: Option<ChangelogSection>,
    pub(crate) manifest: Option<ManifestSection>,
    pub(crate) summarizer: Option<SummarizerSection>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChangelogSection {
    pub(crate) path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ManifestSection {
    pub(crate) path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct SummarizerSection {
    pub(crate) command: Option<Vec<String>>,
    pub(crate) max_input_chars: Option<usize>,
}
