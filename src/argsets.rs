use std::path::PathBuf;

#[derive(Debug)]
pub struct ExtractArgs {
    pub config: PathBuf,
    pub output: Option<PathBuf>,
}
