use hygiene_report_api::config::ReportConfig;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::repository::reference::{ReferenceRepoFactory, ReferenceRepositories};
use crate::repository::scan::{ScanRepoFactory, ScanRepositories};
use crate::sheet_store::SheetStore;
use crate::workbook::{SharedWorkbook, Workbook};

/// Owns one workbook and hands out repositories over it.
pub struct SheetRepositories {
    workbook: SharedWorkbook,
    reference_factory: Arc<ReferenceRepoFactory>,
    scan_factory: Arc<ScanRepoFactory>,
}

impl SheetRepositories {
    pub fn new(workbook: Workbook, config: ReportConfig) -> Self {
        Self::with_clock(workbook, config, Arc::new(SystemClock))
    }

    pub fn with_clock(workbook: Workbook, config: ReportConfig, clock: Arc<dyn Clock>) -> Self {
        let workbook = Arc::new(RwLock::new(workbook));
        Self {
            reference_factory: ReferenceRepoFactory::new(workbook.clone()),
            scan_factory: ScanRepoFactory::new(workbook.clone(), config, clock),
            workbook,
        }
    }

    pub fn workbook(&self) -> SharedWorkbook {
        self.workbook.clone()
    }

    /// Copy of the current workbook, for the embedding application to save.
    pub fn snapshot(&self) -> Workbook {
        self.workbook.read().clone()
    }

    /// Create all repositories sharing the workbook
    pub fn create_all_repositories(&self) -> (ReferenceRepositories, ScanRepositories) {
        (
            self.reference_factory.build_all_repos(),
            self.scan_factory.build_all_repos(),
        )
    }

    pub fn create_store(&self) -> SheetStore {
        let (reference_repos, scan_repos) = self.create_all_repositories();
        SheetStore::new(reference_repos, scan_repos)
    }
}
