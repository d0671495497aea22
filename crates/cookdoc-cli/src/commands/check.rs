use crate::config::Config;
use crate::report::{JsonReporter, TextReporter};
use crate::support::{exit_with_error, print_json_or_exit, reconcile_or_exit};
use cookdoc_core::Runner;
use cookdoc_shell::GitCli;

pub fn run(config: &Config, json_output: bool) {
    let entries = reconcile_or_exit(config);
    let git = GitCli::new(&config.git.program);
    let runner = Runner::new(&git);

    let summary = if json_output {
        let mut reporter = JsonReporter::default();
        let summary = runner
            .run(&entries, &mut reporter)
            .unwrap_or_else(|e| exit_with_error(e));
        print_json_or_exit(&reporter.finish(summary));
        summary
    } else {
        let mut reporter = TextReporter::default();
        let summary = runner
            .run(&entries, &mut reporter)
            .unwrap_or_else(|e| exit_with_error(e));
        print!("{}", reporter.finish(&summary));
        summary
    };

    if !summary.is_clean() {
        std::process::exit(1);
    }
}
