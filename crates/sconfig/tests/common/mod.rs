#![allow(dead_code)]

use sconfig::Specification;
use std::time::Duration;

/// One field per supported type.
#[derive(Debug, Default, PartialEq, Specification)]
pub struct Everything {
    #[sconfig(flag = "string")]
    pub string: String,
    #[sconfig(flag = "bool")]
    pub bool: bool,
    #[sconfig(flag = "int")]
    pub int: isize,
    #[sconfig(flag = "int8")]
    pub int8: i8,
    #[sconfig(flag = "int16")]
    pub int16: i16,
    #[sconfig(flag = "int32")]
    pub int32: i32,
    #[sconfig(flag = "int64")]
    pub int64: i64,
    #[sconfig(flag = "uint")]
    pub uint: usize,
    #[sconfig(flag = "uint8")]
    pub uint8: u8,
    #[sconfig(flag = "uint16")]
    pub uint16: u16,
    #[sconfig(flag = "uint32")]
    pub uint32: u32,
    #[sconfig(flag = "uint64")]
    pub uint64: u64,
    #[sconfig(flag = "float32")]
    pub float32: f32,
    #[sconfig(flag = "float64")]
    pub float64: f64,
    #[sconfig(flag = "duration")]
    pub duration: Duration,
    #[sconfig(flag = "string_slice")]
    pub string_slice: Vec<String>,
    #[sconfig(flag = "bool_slice")]
    pub bool_slice: Vec<bool>,
    #[sconfig(flag = "int_slice")]
    pub int_slice: Vec<isize>,
    #[sconfig(flag = "int32_slice")]
    pub int32_slice: Vec<i32>,
    #[sconfig(flag = "int64_slice")]
    pub int64_slice: Vec<i64>,
    #[sconfig(flag = "uint_slice")]
    pub uint_slice: Vec<usize>,
    #[sconfig(flag = "float64_slice")]
    pub float64_slice: Vec<f64>,
    #[sconfig(flag = "duration_slice")]
    pub duration_slice: Vec<Duration>,
}

/// Input text per field, shared by the environment and flag tests.
pub const INPUTS: &[(&str, &str)] = &[
    ("string", "hello"),
    ("bool", "true"),
    ("int", "123"),
    ("int8", "-8"),
    ("int16", "-1600"),
    ("int32", "-320000"),
    ("int64", "-6400000000"),
    ("uint", "123"),
    ("uint8", "255"),
    ("uint16", "65535"),
    ("uint32", "4000000000"),
    ("uint64", "18000000000000000000"),
    ("float32", "1.5"),
    ("float64", "3.25"),
    ("duration", "10m"),
    ("string_slice", "apple,banana,orange"),
    ("bool_slice", "true,false,true"),
    ("int_slice", "1,2,3"),
    ("int32_slice", "-1,0,1"),
    ("int64_slice", "9000000000,-9000000000"),
    ("uint_slice", "4,5,6"),
    ("float64_slice", "0.5,1.25"),
    ("duration_slice", "5s,10s,20m"),
];

pub fn expected() -> Everything {
    Everything {
        string: "hello".to_owned(),
        bool: true,
        int: 123,
        int8: -8,
        int16: -1600,
        int32: -320_000,
        int64: -6_400_000_000,
        uint: 123,
        uint8: 255,
        uint16: 65535,
        uint32: 4_000_000_000,
        uint64: 18_000_000_000_000_000_000,
        float32: 1.5,
        float64: 3.25,
        duration: Duration::from_secs(600),
        string_slice: vec!["apple".to_owned(), "banana".to_owned(), "orange".to_owned()],
        bool_slice: vec![true, false, true],
        int_slice: vec![1, 2, 3],
        int32_slice: vec![-1, 0, 1],
        int64_slice: vec![9_000_000_000, -9_000_000_000],
        uint_slice: vec![4, 5, 6],
        float64_slice: vec![0.5, 1.25],
        duration_slice: vec![
            Duration::from_secs(5),
            Duration::from_secs(10),
            Duration::from_secs(20 * 60),
        ],
    }
}
