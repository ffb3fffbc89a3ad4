use std::process::ExitCode;

use clap::Parser;
use solar_sizing_toolbox::cli::Args;
use solar_sizing_toolbox::{app, config, i18n};
use tracing::level_filters::LevelFilter;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();

    let mut tr = i18n::Translator::new(&i18n::resolve_language(args.lang.as_deref(), None));
    match try_run(args, &mut tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: Args, tr: &mut i18n::Translator) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default(&args.config)?;
    let lang = i18n::resolve_language(args.lang.as_deref(), cfg.language.as_deref());
    *tr = i18n::Translator::new_with_pack(&lang, args.locales.as_deref());
    match args.command {
        Some(command) => app::run_command(command, &mut cfg, &args.config, tr),
        None => app::run(&mut cfg, &args.config, tr),
    }
}
