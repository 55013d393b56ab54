mod aggregate;
mod common;
mod domain;
mod risk;
