use coworkers_core::db::open_db_in_memory;
use coworkers_core::{CompanyAttributes, CoworkerAdder, CoworkerParams, MemberAttributes, Space};
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGER: CapturingLogger = CapturingLogger;

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

fn take_lines() -> Vec<String> {
    std::mem::take(&mut *CAPTURED.lock().unwrap())
}

fn params(member: MemberAttributes) -> CoworkerParams {
    CoworkerParams::new(member, CompanyAttributes::new("Secret Company")).unwrap()
}

fn assert_no_personal_data(lines: &[String], values: &[&str]) {
    for line in lines {
        for value in values {
            assert!(!line.contains(value), "`{value}` leaked into log: {line}");
        }
    }
}

// One test per binary: the `log` facade accepts a single global logger.
#[test]
fn add_logs_only_metadata_on_every_outcome() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let name = "Johnathan Privateperson";
    let phone_no = "+351 912 000 111";
    let email = "john.private@example.com";
    let bad_email = "john.secret-at-example";
    let personal = [name, phone_no, email, bad_email, "Secret Company"];

    let conn = open_db_in_memory().unwrap();
    let space = Space::new(1, "Factory");
    take_lines();

    let valid = MemberAttributes::new(name)
        .with_phone_no(phone_no)
        .with_email(email);
    let adder = CoworkerAdder::with_sqlite(params(valid.clone()), &space, &conn).unwrap();
    assert!(adder.add().is_ok());
    let ok_lines = take_lines();
    assert!(ok_lines.iter().any(|line| line.contains("status=ok")));
    assert_no_personal_data(&ok_lines, &personal);

    let invalid = MemberAttributes::new(name)
        .with_phone_no(phone_no)
        .with_email(bad_email);
    let adder = CoworkerAdder::with_sqlite(params(invalid), &space, &conn).unwrap();
    assert!(adder.add().is_err());
    let aborted_lines = take_lines();
    assert!(aborted_lines
        .iter()
        .any(|line| line.contains("status=aborted") && line.contains("reason_code=invalid_email")));
    assert_no_personal_data(&aborted_lines, &personal);

    let adder = CoworkerAdder::with_sqlite(params(valid), &space, &conn).unwrap();
    conn.execute_batch("DROP TABLE members;").unwrap();
    assert!(adder.add().is_err());
    let error_lines = take_lines();
    assert!(error_lines.iter().any(|line| line.contains("status=error")));
    assert_no_personal_data(&error_lines, &personal);
}
