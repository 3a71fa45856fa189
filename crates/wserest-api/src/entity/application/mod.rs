// Application sub-entities
//
// Configuration fragments attached to application create/update bodies.
// Each one models the commonly used fields explicitly; anything else the
// server accepts can be carried in `extra`.

mod advanced;
mod drm;
mod dvr;
mod modules;
mod security;
mod stream;
mod transcoder;

pub use advanced::{AdvancedSettingItem, AdvancedSettings};
pub use drm::DrmConfig;
pub use dvr::DvrConfig;
pub use modules::{ModuleItem, Modules};
pub use security::SecurityConfig;
pub use stream::StreamConfig;
pub use transcoder::TranscoderConfig;

use crate::entity::SubEntity;

/// The optional fragments an application create/update may carry.
///
/// Present fragments are attached in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub stream: Option<StreamConfig>,
    pub security: Option<SecurityConfig>,
    pub modules: Option<Modules>,
    pub dvr: Option<DvrConfig>,
    pub transcoder: Option<TranscoderConfig>,
    pub drm: Option<DrmConfig>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream(mut self, config: StreamConfig) -> Self {
        self.stream = Some(config);
        self
    }

    pub fn security(mut self, config: SecurityConfig) -> Self {
        self.security = Some(config);
        self
    }

    pub fn modules(mut self, modules: Modules) -> Self {
        self.modules = Some(modules);
        self
    }

    pub fn dvr(mut self, config: DvrConfig) -> Self {
        self.dvr = Some(config);
        self
    }

    pub fn transcoder(mut self, config: TranscoderConfig) -> Self {
        self.transcoder = Some(config);
        self
    }

    pub fn drm(mut self, config: DrmConfig) -> Self {
        self.drm = Some(config);
        self
    }

    /// The present fragments, in attachment order.
    pub fn fragments(&self) -> Vec<&dyn SubEntity> {
        let mut out: Vec<&dyn SubEntity> = Vec::new();
        if let Some(ref c) = self.stream {
            out.push(c);
        }
        if let Some(ref c) = self.security {
            out.push(c);
        }
        if let Some(ref c) = self.modules {
            out.push(c);
        }
        if let Some(ref c) = self.dvr {
            out.push(c);
        }
        if let Some(ref c) = self.transcoder {
            out.push(c);
        }
        if let Some(ref c) = self.drm {
            out.push(c);
        }
        out
    }
}
