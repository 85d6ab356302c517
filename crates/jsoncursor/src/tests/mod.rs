mod adapter;
mod parse_bad;
mod properties;
