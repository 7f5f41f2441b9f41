use hygiene_report_api::config::ReportConfig;
use std::sync::Arc;

use super::ScanRecordRepositoryImpl;
use crate::clock::Clock;
use crate::workbook::SharedWorkbook;

/// Factory for the scan log repositories of one workbook.
///
/// Holds the clock and configuration every record repository built from it
/// shares, so ids and timestamps stay consistent across repositories.
pub struct ScanRepoFactory {
    workbook: SharedWorkbook,
    config: ReportConfig,
    clock: Arc<dyn Clock>,
}

impl ScanRepoFactory {
    pub fn new(workbook: SharedWorkbook, config: ReportConfig, clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self {
            workbook,
            config,
            clock,
        })
    }

    pub fn build_scan_record_repo(&self) -> Arc<ScanRecordRepositoryImpl> {
        Arc::new(ScanRecordRepositoryImpl::new(
            self.workbook.clone(),
            self.config.clone(),
            self.clock.clone(),
        ))
    }

    pub fn build_all_repos(&self) -> ScanRepositories {
        ScanRepositories {
            scan_record_repository: self.build_scan_record_repo(),
        }
    }
}

/// Container for the scan log repositories.
pub struct ScanRepositories {
    pub scan_record_repository: Arc<ScanRecordRepositoryImpl>,
}
