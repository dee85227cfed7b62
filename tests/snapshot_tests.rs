use insta::assert_debug_snapshot;

use pulsetop::monitor::{ProcessLister, ProcessRecord, ProcessScan, ScriptedProbe};

fn mock_record(name: &str, pid: u32, working_set_bytes: u64) -> ProcessRecord {
    ProcessRecord {
        name: name.to_string(),
        pid,
        working_set_bytes,
    }
}

#[test]
fn deterministic_order_from_mock_data() {
    let mut probe = ScriptedProbe::new();
    probe.push_processes(Ok(ProcessScan {
        records: vec![
            mock_record("indexer", 100, 524_288_000),
            mock_record("db", 50, 524_288_000),
            mock_record("shell", 10, 104_857_600),
            mock_record("agent", 900, 8_388_608),
        ],
        omitted: 0,
    }));

    let scan = ProcessLister::new(Some(3)).list(&mut probe).unwrap();

    assert_debug_snapshot!(scan.records, @r###"
    [
        ProcessRecord {
            name: "db",
            pid: 50,
            working_set_bytes: 524288000,
        },
        ProcessRecord {
            name: "indexer",
            pid: 100,
            working_set_bytes: 524288000,
        },
        ProcessRecord {
            name: "shell",
            pid: 10,
            working_set_bytes: 104857600,
        },
    ]
    "###);
}
