use clap::Command;
use sconfig::{
    BindError, Binder, CommandLine, FieldKind, FieldSpec, Resolved, ScalarKind, Specification,
};
use std::collections::HashMap;

/// Hand-written table whose names collide once uppercased.
#[derive(Debug, Default)]
struct Colliding {
    port: u16,
}

impl Specification for Colliding {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("port", FieldKind::Scalar(ScalarKind::U16)).with_flag("port"),
            FieldSpec::new("PORT", FieldKind::Scalar(ScalarKind::U16)).with_flag("listen"),
        ]
    }

    fn assign(&mut self, resolved: &Resolved) -> sconfig::Result<()> {
        if let Some(port) = resolved.coerce("port")? {
            self.port = port;
        }
        Ok(())
    }
}

fn empty_command_line() -> CommandLine {
    CommandLine::new(Command::new("app")).with_args(["app"])
}

#[test]
fn invalid_specification_registers_nothing() {
    let mut config = Colliding::default();
    let mut cli = empty_command_line();

    let err = Binder::new(&mut config).bind_flags(&mut cli).parse().unwrap_err();

    assert!(matches!(err, BindError::InvalidSpecification { .. }), "{err}");
    assert_eq!(cli.command().get_arguments().count(), 0);
    assert!(cli.matches().is_none());
}

#[test]
fn malformed_flag_tag_names_the_field() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(flag = "a,b,c")]
        string: String,
    }

    let mut config = Config::default();
    let mut cli = empty_command_line();
    let err = Binder::new(&mut config).bind_flags(&mut cli).parse().unwrap_err();

    let BindError::InvalidField { field, source } = &err else {
        panic!("expected an invalid field error, got {err}");
    };
    assert_eq!(field, "string");
    assert!(matches!(source.as_ref(), BindError::InvalidFlagFormat { format } if format == "a,b,c"));
    assert_eq!(err.to_string(), "invalid field string: invalid flag format \"a,b,c\"");
}

#[test]
fn unsupported_type_names_the_type() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(flag = "peers")]
        peers: HashMap<String, u16>,
    }

    let mut config = Config::default();
    let mut cli = empty_command_line();
    let err = Binder::new(&mut config).bind_flags(&mut cli).parse().unwrap_err();

    assert!(matches!(&err, BindError::InvalidField { field, .. } if field == "peers"));
    assert!(matches!(
        err.root_cause(),
        BindError::UnsupportedFieldType { ty } if ty == "HashMap<String, u16>"
    ));
}

#[test]
fn unsupported_type_without_sources_is_left_alone() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(default = "8080")]
        port: u16,
        peers: HashMap<String, u16>,
    }

    let mut config = Config::default();
    Binder::new(&mut config).parse().expect("unsupported field has no sources");

    assert_eq!(config.port, 8080);
    assert!(config.peers.is_empty());
}

#[test]
fn unsupported_type_without_flag_tolerates_environment_mode() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(default = "8080")]
        port: u16,
        proxy: Option<String>,
    }

    let mut config = Config::default();
    Binder::new(&mut config)
        .enable_environment("APP")
        .with_environment_vars([("APP_PORT", "9000"), ("APP_PROXY", "http://proxy:3128")])
        .parse()
        .expect("unsupported field without a flag is skipped");

    assert_eq!(config.port, 9000);
    assert_eq!(config.proxy, None);
}

#[test]
fn duplicate_flags_are_rejected() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(flag = "port,p")]
        port: u16,
        #[sconfig(flag = "peer,p")]
        peer: String,
    }

    let mut config = Config::default();
    let mut cli = empty_command_line();
    let err = Binder::new(&mut config).bind_flags(&mut cli).parse().unwrap_err();

    assert!(matches!(&err, BindError::InvalidField { field, .. } if field == "peer"));
    assert!(matches!(err.root_cause(), BindError::DuplicateFlag { flag } if flag == "-p"));
}

#[test]
fn coercion_failure_leaves_record_untouched() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(default = "example.com")]
        host: String,
        port: u16,
    }

    let mut config = Config { host: "before".to_owned(), port: 1 };
    let err = Binder::new(&mut config)
        .enable_environment("APP")
        .with_environment_vars([("APP_PORT", "99999")])
        .parse()
        .unwrap_err();

    assert!(matches!(&err, BindError::Coercion { field, value, .. } if field == "port" && value == "99999"));
    assert_eq!(config.host, "before");
    assert_eq!(config.port, 1);
}

#[test]
fn invalid_default_surfaces_as_coercion_error() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(default = "soon")]
        timeout: std::time::Duration,
    }

    let mut config = Config::default();
    let err = Binder::new(&mut config).parse().unwrap_err();

    assert!(matches!(err, BindError::Coercion { .. }), "{err}");
}

#[test]
fn registration_failure_skips_invocation() {
    #[derive(Debug, Default, Specification)]
    struct Config {
        #[sconfig(flag = "port")]
        port: u16,
        #[sconfig(flag = "bad,tag,here")]
        name: String,
        #[sconfig(flag = "workers")]
        workers: u8,
    }

    let mut config = Config::default();
    let mut cli = CommandLine::new(Command::new("app")).with_args(["app", "--port=80"]);
    let err = Binder::new(&mut config).bind_flags(&mut cli).parse().unwrap_err();

    assert!(matches!(&err, BindError::InvalidField { field, .. } if field == "name"));
    assert!(cli.matches().is_none());
    assert_eq!(config.port, 0);

    let longs: Vec<_> = cli.command().get_arguments().filter_map(clap::Arg::get_long).collect();
    assert_eq!(longs, ["port"]);
}
