fn main() {
    use simplesh::config::ConfigLoader;
    use simplesh::executor::ForkExecutor;
    use simplesh::{logging, repl, signals};
    use std::io;

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("simplesh: config: {}", e);
            ConfigLoader::default_config()
        }
    };
    logging::init(&config);

    if let Err(e) = signals::install_interactive_handlers() {
        log::warn!("could not install signal handlers: {}", e);
    }

    let mut executor = ForkExecutor::new(&config);
    let stdin = io::stdin();
    if let Err(e) = repl::run(&config, stdin.lock(), io::stdout(), &mut executor) {
        eprintln!("simplesh: {}", e);
        std::process::exit(1);
    }
}
