use std::sync::Arc;

use crate::ical::RenderOptions;
use crate::ServiceError;
use async_trait::async_trait;
use export_utils::Charset;
use mockall::automock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub product_id: Arc<str>,
    pub fold_lines: bool,
    pub legacy_dtstamp: bool,
    pub output_charset: Charset,
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            product_id: self.product_id.clone(),
            fold_lines: self.fold_lines,
            legacy_dtstamp: self.legacy_dtstamp,
        }
    }
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, ServiceError>;
}
