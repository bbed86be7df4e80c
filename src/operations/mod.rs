//! # Entity Workflows
//!
//! One module per entity. Every workflow takes the connection explicitly and
//! is generic over [`sea_orm::ConnectionTrait`], so the same code runs on the
//! shared pool or inside a transaction. Writes that touch more than one table
//! (a project with its leader, membership changes) additionally require
//! [`sea_orm::TransactionTrait`] and commit as a unit.
//!
//! Workflows validate first and persist second: a request rejected with
//! `Validation` or `BadRequest` leaves the database untouched.

pub mod employees;
pub mod projects;
pub mod tasks;
