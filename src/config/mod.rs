/// Configuration system: TOML file + embedded defaults
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, MirrorNodeConfig, PricingConfig, SearchConfig, StakingConfig};
pub use utils::{
    load_config, load_config_from_path, parse_config, save_config, CONFIG_FILE_PATH,
};
