//! 机器翻译
//!
//! - **translator**: `Translator` trait 与语言代码工具
//! - **mock**: 测试用的模拟翻译器
//! - **libre** / **mymemory** / **deepl**: 在线服务（需要 `mt` 功能）
//! - **languages**: 各服务支持的语言表
//! - **driver**: 批量翻译翻译表（分批、限速、定期保存、暂停、中断续跑）

#[cfg(feature = "mt")]
pub mod deepl;
pub mod driver;
pub mod error;
pub mod languages;
#[cfg(feature = "mt")]
pub mod libre;
pub mod mock;
#[cfg(feature = "mt")]
pub mod mymemory;
pub mod translator;

#[cfg(feature = "mt")]
pub use deepl::DeepLProvider;
pub use driver::{translated_output_path, BatchTranslator, DriverOptions, DriverReport};
pub use error::{MtError, MtResult};
#[cfg(feature = "mt")]
pub use libre::LibreTranslateProvider;
pub use mock::{MockMode, MockTranslator};
#[cfg(feature = "mt")]
pub use mymemory::MyMemoryProvider;
pub use translator::Translator;

/// 可用的在线翻译服务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Engine {
    Libre,
    Mymemory,
    Deepl,
}

/// 在线服务的连接参数，未设置的项从环境变量读取
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// LibreTranslate 地址（覆盖 `LIBRETRANSLATE_URL`）
    pub endpoint: Option<String>,
    /// DeepL 密钥（覆盖 `DEEPL_API_KEY`）
    pub deepl_key: Option<String>,
}

/// 创建在线翻译器
#[cfg(feature = "mt")]
pub fn create_translator(
    engine: Engine,
    source: &str,
    target: &str,
    options: &EngineOptions,
) -> MtResult<Box<dyn Translator>> {
    for locale in [source, target] {
        if !engine.supports(locale) {
            tracing::warn!("{} 的语言表中没有 {}，仍尝试请求", engine.display_name(), locale);
        }
    }

    Ok(match engine {
        Engine::Libre => match &options.endpoint {
            Some(url) => Box::new(LibreTranslateProvider::new(
                url,
                std::env::var("LIBRETRANSLATE_API_KEY").ok(),
                source,
                target,
            )?),
            None => Box::new(LibreTranslateProvider::from_env(source, target)?),
        },
        Engine::Mymemory => Box::new(MyMemoryProvider::from_env(source, target)?),
        Engine::Deepl => Box::new(DeepLProvider::from_env(options.deepl_key.as_deref(), source, target)?),
    })
}
