use sconfig::Specification;

#[derive(Specification)]
pub enum Mode {
    Fast,
    Slow,
}

fn main() {}
