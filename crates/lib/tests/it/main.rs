/*! Integration tests for formstate.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - path: Tests for KeyPath encoding and decoding
 * - access: Tests for get_deep / set_deep on JSON subjects and shadow trees
 * - flatten: Tests for flatten_object and flatten_object_to_array
 * - freeze: Tests for deep_freeze and Frozen snapshots
 * - tracker: Tests for MutationTracker and SharedTracker
 * - form: Tests for FormState, FormConfig and validator folding
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("formstate=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod form;
mod tracker;
