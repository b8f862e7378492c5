use super::{AgentsSelection, ListParams, WireEnum, WireMap, WireParams, WireWriter};

/// Kind of FIM entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscheckType {
    File,
    RegistryKey,
    RegistryValue,
}

impl WireEnum for SyscheckType {
    fn wire_value(self) -> &'static str {
        match self {
            SyscheckType::File => "file",
            SyscheckType::RegistryKey => "registry_key",
            SyscheckType::RegistryValue => "registry_value",
        }
    }
}

/// Query parameters of `GET /syscheck/{agent_id}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyscheckParams {
    pub list: ListParams,
    pub file: Option<String>,
    pub arch: Option<String>,
    pub value_name: Option<String>,
    pub value_type: Option<String>,
    pub entry_type: Option<SyscheckType>,
    pub summary: Option<bool>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
    pub hash: Option<String>,
    pub distinct: Option<bool>,
}

impl SyscheckParams {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }
}

impl WireParams for SyscheckParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.list)
            .text("file", self.file.as_deref())
            .text("arch", self.arch.as_deref())
            .text("value.name", self.value_name.as_deref())
            .text("value.type", self.value_type.as_deref())
            .wire_enum("type", self.entry_type)
            .flag("summary", self.summary)
            .text("md5", self.md5.as_deref())
            .text("sha1", self.sha1.as_deref())
            .text("sha256", self.sha256.as_deref())
            .text("hash", self.hash.as_deref())
            .flag("distinct", self.distinct)
            .finish()
    }
}

/// Query parameters of `PUT /syscheck`.
pub type SyscheckScanParams = AgentsSelection;
