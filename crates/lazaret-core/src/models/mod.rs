pub mod audit;
pub mod deployment;
pub mod disposition;
pub mod scan;
pub mod threat;

pub use audit::AuditRecord;
pub use deployment::DeploymentMode;
pub use disposition::{Disposition, ScanAction};
pub use scan::{ScanReport, ScanRequest, ScanStatus, StoreRef};
pub use threat::{ClassificationResult, ThreatDetail};
