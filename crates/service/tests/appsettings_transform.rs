use std::fs;
use std::path::Path;

use serde_json::Value;
use service::{generate_default_app_settings_file, update_connection_strings, ConnectionStringEntry};

fn connection_strings(path: &Path) -> anyhow::Result<serde_json::Map<String, Value>> {
    let doc: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    match doc.get("ConnectionStrings") {
        Some(Value::Object(map)) => Ok(map.clone()),
        other => Err(anyhow::anyhow!("ConnectionStrings missing or not an object: {other:?}")),
    }
}

fn default_entry() -> ConnectionStringEntry {
    ConnectionStringEntry::new(
        "DefaultConnection",
        r"Server=(localdb)\mssqllocaldb; Database=defaultDB;Trusted_Connection=True;MultipleActiveResultSets=true",
    )
}

fn car_entry() -> ConnectionStringEntry {
    ConnectionStringEntry::new(
        "CarConnection",
        r"Server=(localdb)\mssqllocaldb; Database=CarDB;Trusted_Connection=True;MultipleActiveResultSets=true",
    )
}

fn person_entry() -> ConnectionStringEntry {
    ConnectionStringEntry::new(
        "PersonConnection",
        r"Server=(localdb)\mssqllocaldb; Database=PersonDb;Trusted_Connection=True;MultipleActiveResultSets=true",
    )
}

#[test]
fn generate_default_file_has_empty_default_connection() -> anyhow::Result<()> {
    let file = generate_default_app_settings_file()?;
    assert!(file.is_file());
    assert!(file.is_absolute());

    let connections = connection_strings(&file)?;
    assert_eq!(connections.get("DefaultConnection"), Some(&Value::String(String::new())));

    let _ = fs::remove_file(&file);
    Ok(())
}

#[test]
fn updates_single_connection_string() -> anyhow::Result<()> {
    let cases = [
        (
            "DefaultConnection",
            r"Server=(localdb)\mssqllocaldb;Database=defaultDB;Trusted_Connection=True;MultipleActiveResultSets=true",
        ),
        ("EmptyConnection", ""),
        ("", "SomeConnectionStringValue"),
    ];

    for (name, value) in cases {
        let file = generate_default_app_settings_file()?;
        update_connection_strings(&file, &[ConnectionStringEntry::new(name, value)])?;

        let connections = connection_strings(&file)?;
        assert_eq!(connections.get(name).and_then(Value::as_str), Some(value), "entry `{name}`");

        let _ = fs::remove_file(&file);
    }
    Ok(())
}

#[test]
fn updates_multiple_connection_strings() -> anyhow::Result<()> {
    let sets = [vec![default_entry()], vec![default_entry(), car_entry(), person_entry()]];

    for entries in sets {
        let file = generate_default_app_settings_file()?;
        update_connection_strings(&file, &entries)?;

        let connections = connection_strings(&file)?;
        for entry in &entries {
            assert_eq!(connections.get(&entry.name).and_then(Value::as_str), Some(entry.value.as_str()));
        }
        assert_eq!(connections.len(), entries.len());

        let _ = fs::remove_file(&file);
    }
    Ok(())
}

#[test]
fn applying_same_entry_twice_is_idempotent() -> anyhow::Result<()> {
    let file = generate_default_app_settings_file()?;
    update_connection_strings(&file, &[car_entry()])?;
    let once = fs::read_to_string(&file)?;
    update_connection_strings(&file, &[car_entry()])?;
    assert_eq!(fs::read_to_string(&file)?, once);

    let _ = fs::remove_file(&file);
    Ok(())
}

#[test]
fn unrelated_keys_survive_update() -> anyhow::Result<()> {
    let file = generate_default_app_settings_file()?;
    let before: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;

    update_connection_strings(&file, &[person_entry()])?;

    let after: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
    assert_eq!(after["Logging"], before["Logging"]);
    assert_eq!(after["ConnectionStrings"]["DefaultConnection"], Value::String(String::new()));

    let _ = fs::remove_file(&file);
    Ok(())
}

#[test]
fn invalid_json_is_parse_error_and_file_is_kept() -> anyhow::Result<()> {
    let file = std::env::temp_dir().join(format!("appsettings_invalid_{}.json", uuid::Uuid::new_v4()));
    fs::write(&file, "{ \"ConnectionStrings\": ")?;

    let err = update_connection_strings(&file, &[car_entry()]).unwrap_err();
    assert!(err.is_parse(), "unexpected error: {err}");
    assert_eq!(fs::read_to_string(&file)?, "{ \"ConnectionStrings\": ");

    let _ = fs::remove_file(&file);
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let file = std::env::temp_dir().join(format!("appsettings_missing_{}.json", uuid::Uuid::new_v4()));
    let err = update_connection_strings(&file, &[car_entry()]).unwrap_err();
    assert!(err.is_io(), "unexpected error: {err}");
}

#[test]
fn seed_file_with_byte_order_mark_is_accepted() -> anyhow::Result<()> {
    let file = std::env::temp_dir().join(format!("appsettings_bom_{}.json", uuid::Uuid::new_v4()));
    fs::write(&file, b"\xEF\xBB\xBF{\"ConnectionStrings\":{\"DefaultConnection\":\"\"}}")?;

    update_connection_strings(&file, &[car_entry()])?;

    let connections = connection_strings(&file)?;
    assert_eq!(connections.get("CarConnection").and_then(Value::as_str), Some(car_entry().value.as_str()));
    assert_eq!(connections.get("DefaultConnection"), Some(&Value::String(String::new())));

    let _ = fs::remove_file(&file);
    Ok(())
}

#[cfg(unix)]
#[test]
fn update_through_symlink_rewrites_target() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let target = generate_default_app_settings_file()?;
    fs::set_permissions(&target, fs::Permissions::from_mode(0o600))?;
    let link = std::env::temp_dir().join(format!("appsettings_link_{}.json", uuid::Uuid::new_v4()));
    std::os::unix::fs::symlink(&target, &link)?;

    update_connection_strings(&link, &[ConnectionStringEntry::new("Db", "secret")])?;

    assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
    assert_eq!(connection_strings(&target)?.get("Db").and_then(Value::as_str), Some("secret"));
    assert_eq!(fs::metadata(&target)?.permissions().mode() & 0o777, 0o600);

    let _ = fs::remove_file(&link);
    let _ = fs::remove_file(&target);
    Ok(())
}
