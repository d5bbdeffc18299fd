use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::dataset::NormalizeOptions;
use crate::rows::DimensionScope;

pub const DEFAULT_WORKBOOK: &str = "layouts.xlsx";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Server-side settings. The workbook path is resolved against the working
/// directory, the same way the file is deployed next to the binary.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub workbook_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub normalize: NormalizeOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            normalize: NormalizeOptions::default(),
        }
    }
}

impl DashboardConfig {
    pub fn new(workbook_path: impl AsRef<Path>) -> Self {
        Self {
            workbook_path: workbook_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_dimension_scope(mut self, scope: DimensionScope) -> Self {
        self.normalize.dimension_scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.workbook_path, PathBuf::from(DEFAULT_WORKBOOK));
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(config.normalize.dimension_scope, DimensionScope::Both);
    }

    #[test]
    fn builder_overrides_fields() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let config = DashboardConfig::new("data/layouts.xlsx")
            .with_bind_addr(addr)
            .with_dimension_scope(DimensionScope::Header);
        assert_eq!(config.workbook_path, PathBuf::from("data/layouts.xlsx"));
        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.normalize.dimension_scope, DimensionScope::Header);
    }
}
