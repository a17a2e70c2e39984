//! Scenario bindings for the scope resolution feature file.
//!
//! These functions bind Gherkin scenario names to the step definitions in the
//! parent module.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Plain capture covers its node"
)]
fn plain_capture(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Same-position captures nest in arrival order"
)]
fn same_position_nesting(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Final capture locks its range"
)]
fn final_capture(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Shy capture yields to an earlier claim"
)]
fn shy_capture(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Descriptor adjustment narrows the range"
)]
fn descriptor_adjustment(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Pattern without a match drops the capture"
)]
fn unmatched_pattern(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Adjustment leaving the node is an error"
)]
fn adjustment_out_of_bounds(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/scope_resolver.feature",
    name = "Reset discards boundaries"
)]
fn reset_discards(world: RefCell<TestWorld>) {
    drop(world);
}
