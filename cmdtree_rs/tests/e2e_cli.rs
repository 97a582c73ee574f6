//! End-to-end tests for the `cmdt` sample binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command pointing to the cmdt binary
fn cmdt() -> Command {
    let mut cmd = cargo_bin_cmd!("cmdt");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================
// Basic CLI Tests
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        cmdt()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Sample command tree"))
            .stdout(predicate::str::contains("--log-level"));
    }

    #[test]
    fn shows_version() {
        cmdt()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn no_arguments_prints_default_help() {
        cmdt()
            .assert()
            .success()
            .stdout(predicate::str::starts_with("cmdt -- sample command tree\n"))
            .stdout(predicate::str::contains("    greet -- print a greeting\n"))
            .stdout(predicate::str::contains(
                "    shell -- start an interactive session\n",
            ));
    }

    #[test]
    fn help_for_nested_action() {
        cmdt()
            .args(["help", "math"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cmdt math -- integer arithmetic"))
            .stdout(predicate::str::contains("    add -- add all arguments"));
    }
}

// ============================================
// Actions
// ============================================

mod actions {
    use super::*;

    #[test]
    fn greet_with_options() {
        cmdt()
            .args(["--color", "never", "greet", "-n", "Ada", "--times", "2"])
            .assert()
            .success()
            .stdout("hello Ada\nhello Ada\n");
    }

    #[test]
    fn greet_trims_and_checks_name() {
        cmdt()
            .args(["--color", "never", "greet", "--name", "  Ada "])
            .assert()
            .success()
            .stdout("hello Ada\n");

        cmdt()
            .args(["greet", "--name", "   "])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "invalid value for option \"--name\": name must not be blank",
            ));
    }

    #[test]
    fn greet_with_color() {
        cmdt()
            .args(["--color", "always", "greet"])
            .assert()
            .success()
            .stdout("hello \x1b[32mworld\x1b[0m\n");
    }

    #[test]
    fn math_and_echo() {
        cmdt()
            .args(["math", "add", "2", "3", "-4"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown option \"-4\""));

        cmdt()
            .args(["math", "mul", "2", "3", "7"])
            .assert()
            .success()
            .stdout("42\n");

        cmdt()
            .args(["echo", "-u", "a", "b"])
            .assert()
            .success()
            .stdout("A B\n");
    }

    #[test]
    fn handler_failure_is_reported() {
        cmdt()
            .args(["math", "add", "2", "x"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "command 'cmdt math add' failed\n\nCause: ParseIntError - invalid digit found in string",
            ));
    }

    #[test]
    fn numeric_option_type_error() {
        cmdt()
            .args(["greet", "--times", "many"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "only values of type 'numeric' allowed for option \"--times\"",
            ));
    }

    #[test]
    fn unknown_action_suggests_close_match() {
        cmdt()
            .arg("gret")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid command argument \"gret\""))
            .stderr(predicate::str::contains("Did you mean: greet?"));
    }
}

// ============================================
// Shell
// ============================================

mod shell {
    use super::*;

    #[test]
    fn runs_lines_from_stdin() {
        cmdt()
            .args(["--color", "never", "shell"])
            .write_stdin("greet\n\nmath add 1 2\nexit\n")
            .assert()
            .success()
            .stdout(
                "Starting shell for command \"cmdt\"\n\
                 [cmdt][1] $ greet\n\
                 hello world\n\
                 [cmdt][2] $ \n\
                 [cmdt][3] $ math add 1 2\n\
                 3\n\
                 [cmdt][4] $ exit\n\
                 shell exited with code 0\n",
            );
    }

    #[test]
    fn exit_code_from_handler() {
        cmdt()
            .args(["--color", "never", "shell"])
            .write_stdin("exit-with 3\n")
            .assert()
            .code(3)
            .stdout(predicate::str::ends_with("shell exited with code 3\n"));
    }

    #[test]
    fn nested_shell_is_rejected() {
        cmdt()
            .args(["--color", "never", "shell"])
            .write_stdin("shell\n")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Cause: IllegalCommand - Cannot run another shell within an already running shell\n",
            ));
    }

    #[test]
    fn config_file_sets_prompt_and_banner() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("cmdt.toml");
        std::fs::write(
            &config_path,
            "color = \"never\"\n\n[shell]\nprompt = \"demo> \"\nbanner = \"hi there\"\n",
        )
        .expect("write config");

        cmdt()
            .arg("--config")
            .arg(&config_path)
            .arg("shell")
            .write_stdin("echo a b\n")
            .assert()
            .success()
            .stdout("hi there\ndemo> echo a b\na b\ndemo> exit\nshell exited with code 0\n");
    }

    #[test]
    fn config_in_working_directory() {
        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join(".cmdtree");
        std::fs::create_dir_all(&config_dir).expect("create .cmdtree");
        std::fs::write(config_dir.join("config.toml"), "[shell]\nbanner = \"local\"\n")
            .expect("write config");

        cmdt()
            .current_dir(temp.path())
            .args(["--color", "never", "shell"])
            .write_stdin("")
            .assert()
            .success()
            .stdout("local\n[cmdt][1] $ exit\nshell exited with code 0\n");
    }

    #[test]
    fn missing_config_file_fails() {
        cmdt()
            .args(["--config", "/definitely/not/here.toml", "greet"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("config file not found"));
    }
}
