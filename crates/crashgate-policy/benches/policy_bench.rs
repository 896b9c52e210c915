// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the upload policy and the manager's decision path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use crashgate_bridge::FilePreferences;
use crashgate_core::{ConnectivityState, CrashgateConfig, NetworkCapability, UserUploadPreference};
use crashgate_policy::{FixedNetwork, PrivacyPreferencesManager, evaluate};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Pure policy over every (preference, connectivity) combination.
fn bench_evaluate(c: &mut Criterion) {
    let states = [
        ConnectivityState::unmetered(),
        ConnectivityState::cellular(),
        ConnectivityState::DISCONNECTED,
    ];

    c.bench_function("policy_evaluate (9 combinations)", |b| {
        b.iter(|| {
            for pref in UserUploadPreference::ALL {
                for conn in states {
                    black_box(evaluate(
                        black_box(NetworkCapability::CELLULAR),
                        black_box(conn),
                        black_box(pref),
                    ));
                }
            }
        });
    });
}

/// Manager decision including the preference read from a JSON file store.
fn bench_manager_decision(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefs = FilePreferences::open(dir.path().join("prefs.json")).expect("open");
    let network = FixedNetwork::new(NetworkCapability::CELLULAR, ConnectivityState::cellular());
    let manager = PrivacyPreferencesManager::new(network, prefs, &CrashgateConfig::default());
    manager
        .set_upload_preference(UserUploadPreference::WifiOnly)
        .expect("save");

    c.bench_function("manager_upload_decision", |b| {
        b.iter(|| black_box(manager.upload_decision().expect("decide")));
    });
}

criterion_group!(benches, bench_evaluate, bench_manager_decision);
criterion_main!(benches);
