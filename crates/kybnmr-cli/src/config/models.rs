use kybnmr::engine::config::DoubleCheckConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub append: bool,
    pub report_path: Option<PathBuf>,
    pub core_config: DoubleCheckConfig,
}
