use sconfig::{FieldKind, ScalarKind, Specification};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default, Specification)]
pub struct Record {
    /// Interface to bind
    #[sconfig(default = "127.0.0.1", flag = "host")]
    pub host: String,
    #[sconfig(flag = "port,p")]
    pub port: u16,
    pub timeouts: Vec<Duration>,
    pub r#type: String,
    pub peers: HashMap<String, u16>,
    #[sconfig(skip)]
    pub cache: Vec<Vec<u8>>,
}

fn main() {
    let fields = Record::fields();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0].help, Some("Interface to bind"));
    assert_eq!(fields[1].flag, Some("port,p"));
    assert_eq!(fields[2].kind, FieldKind::List(ScalarKind::Duration));
    assert_eq!(fields[3].name, "type");
    assert_eq!(fields[4].kind, FieldKind::Unsupported("HashMap<String, u16>"));
}
