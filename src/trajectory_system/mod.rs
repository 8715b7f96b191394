pub mod boundary;
pub mod lean;
