mod extract;

pub use extract::{collect_readings, extract, VendorBatch};
