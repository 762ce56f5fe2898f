use super::BuildArgs;
use crate::cli::GlobalOptions;

/// Builder subcommand that consumes a Dockerfile.
const BUD: &str = "bud";

#[derive(Debug, Default)]
struct CommandArgs {
    args: Vec<String>,
}

impl CommandArgs {
    fn flag(&mut self, name: &str) -> &mut Self {
        self.args.push(format!("--{name}"));
        self
    }

    fn option(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.flag(name);
            self.args.push(value.to_string());
        }
        self
    }

    fn repeated(&mut self, name: &str, values: &[String]) -> &mut Self {
        for value in values {
            self.option(name, Some(value));
        }
        self
    }

    // rendered as `--name=true` / `--name=false`, never as a bare flag
    fn toggle(&mut self, name: &str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.args.push(format!("--{name}={value}"));
        }
        self
    }

    fn word(&mut self, word: &str) -> &mut Self {
        self.args.push(word.to_string());
        self
    }
}

/// Builds the argument vector for `buildah [global options] bud [options] [context]`.
///
/// Global options precede the `bud` token and build options follow it.
/// Repeatable options keep the order they were given in, one flag/value pair
/// per entry.
pub fn bud_command_args(global: &GlobalOptions, build: &BuildArgs) -> Vec<String> {
    let mut cmd = CommandArgs::default();

    if global.log_level.is_debug() {
        cmd.flag("debug");
    }
    cmd.option("root", global.root.as_deref())
        .option("runroot", global.runroot.as_deref())
        .option("storage-driver", global.storage_driver.as_deref())
        .repeated("storage-opt", &global.storage_opt);

    cmd.word(BUD);

    cmd.option("authfile", build.authfile.as_deref())
        .option("cert-dir", build.cert_dir.as_deref())
        .option("creds", build.creds.as_deref())
        .option("format", build.format.as_deref())
        .option("runtime", build.runtime.as_deref())
        .option("signature-policy", build.signature_policy.as_deref());

    cmd.repeated("build-arg", &build.build_arg)
        .repeated("file", &build.file)
        .repeated("runtime-flag", &build.runtime_flag)
        .repeated("tag", &build.tag);

    cmd.toggle("quiet", build.quiet)
        .toggle("tls-verify", build.tls_verify);

    if build.pull_always {
        cmd.flag("pull-always");
    }

    for context in &build.context {
        cmd.word(context);
    }

    cmd.args
}
