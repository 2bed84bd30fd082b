use clip_i18n::config::I18nConfig;
use clip_i18n::preference::JsonFileStore;
use clip_i18n::server::LocaleServer;
use clip_i18n::source::ConfiguredSource;
use clip_i18n::Translator;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage:
  clip-i18n serve                         Serve locale files over HTTP
  clip-i18n detect                        Print the detected preferred language
  clip-i18n t <key> [name=value ...] [--lang <code>]
                                          Resolve a translation key";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = I18nConfig::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("serve") => LocaleServer::new(&config).start().await,
        Some("detect") => {
            with_translator(&config, |i18n| async move {
                println!("{}", i18n.detect_preferred_language());
            })
            .await
        }
        Some("t") if args.len() >= 2 => {
            let (lang, rest) = split_lang_flag(&args[2..]);
            let key = args[1].clone();
            with_translator(&config, |i18n| async move {
                match lang {
                    Some(lang) => i18n.set_language(&lang).await,
                    None => i18n.init().await,
                };
                let pairs: Vec<(&str, &str)> = rest
                    .iter()
                    .filter_map(|kv| kv.split_once('='))
                    .collect();
                println!("{}", i18n.t_with(&key, &pairs));
            })
            .await
        }
        _ => {
            eprintln!("{}", USAGE);
            Ok(())
        }
    }
}

/// `--lang <code>`을 분리하고 나머지 인자(name=value)를 반환
fn split_lang_flag(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut lang = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--lang" {
            lang = iter.next().cloned();
        } else {
            rest.push(arg.clone());
        }
    }
    (lang, rest)
}

/// 설정에 따라 HTTP 또는 디렉토리 소스로 리졸버를 만들어 실행
async fn with_translator<F, Fut>(config: &I18nConfig, run: F) -> anyhow::Result<()>
where
    F: FnOnce(Translator<ConfiguredSource>) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let store = match &config.preference_path {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::new(JsonFileStore::default_path()?),
    };
    let source = ConfiguredSource::from_config(config)?;
    run(Translator::new(config, source, store)).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lang_flag() {
        let args: Vec<String> = ["name=A", "--lang", "zh-CN", "count=3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (lang, rest) = split_lang_flag(&args);
        assert_eq!(lang.as_deref(), Some("zh-CN"));
        assert_eq!(rest, vec!["name=A", "count=3"]);

        let (lang, rest) = split_lang_flag(&[]);
        assert!(lang.is_none());
        assert!(rest.is_empty());
    }
}
