mod settings_file;
mod toml_store;

pub(crate) use {settings_file::SettingsFile, toml_store::TomlSettingsStore};

pub(crate) const QUALIFIER: &str = "com";
pub(crate) const ORGANIZATION: &str = "kitchen-timer";
pub(crate) const APPLICATION: &str = "Kitchen-Timer";
pub(crate) const SETTINGS_FILE_NAME: &str = "settings.toml";
