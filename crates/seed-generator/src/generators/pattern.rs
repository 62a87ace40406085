//! Index-derived string fields.

/// Records per phenotype bucket.
pub const PHENOTYPE_BUCKET_WIDTH: u64 = 100;

/// `"<label> <index>"`
pub fn labelled(label: &str, index: u64) -> String {
    format!("{label} {index}")
}

/// First index of the bucket `index` falls in: `floor(index / 100) * 100`.
pub fn phenotype_bucket(index: u64) -> u64 {
    (index / PHENOTYPE_BUCKET_WIDTH) * PHENOTYPE_BUCKET_WIDTH
}
