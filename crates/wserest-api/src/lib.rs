// wserest-api: Async Rust client for the Wowza Streaming Engine REST API

pub mod application;
pub mod client;
pub mod dvr;
pub mod entity;
pub mod error;
pub mod models;
pub mod query;
pub mod settings;
pub mod transport;

pub use application::Application;
pub use client::{Body, JsonMap, Request, Verb, WseClient};
pub use dvr::{ConvertOptions, DvrClipExtraction};
pub use entity::application::{
    AdvancedSettingItem, AdvancedSettings, AppConfig, DrmConfig, DvrConfig, ModuleItem, Modules,
    SecurityConfig, StreamConfig, TranscoderConfig,
};
pub use entity::{PropertyBag, SubEntity};
pub use error::Error;
pub use models::{
    ActionResponse, ConversionState, WseApp, WseApps, WseDvrConversionStatus, WseDvrConverter,
    WseDvrConverterStore, WseDvrStore, WseDvrStores,
};
pub use query::QueryString;
pub use settings::{AuthMethod, Settings};
pub use transport::{TlsMode, TransportConfig};
