use runner_upgrade_advisor::{ReleaseSet, Version, VersionLine};

#[test]
fn release_set_groups_published_tags_by_minor_line() {
    let set = ReleaseSet::from_release_names([
        "v16.3.0", "v16.2.1", "v16.2.0", "v16.1.0", "v16.0.2", "v16.0.1", "v16.0.0", "latest",
    ]);

    assert_eq!(set.len(), 7);
    assert_eq!(set.newest(), Some(&Version::new(16, 3, 0)));
    assert_eq!(
        set.by_minor().values().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["16.0.2", "16.1.0", "16.2.1", "16.3.0"]
    );
    assert_eq!(set.line_position(VersionLine::new(16, 1)), Some(1));
}

#[test]
fn runner_versions_round_trip_through_display() {
    for input in ["15.2.0", "16.10.3", "0.0.1", "15.9.0-rc1"] {
        assert_eq!(Version::parse(input, true).to_string(), input);
    }
}
