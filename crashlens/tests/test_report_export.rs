use crashlens::config::PipelineConfig;
use crashlens::correction::KnownFiles;
use crashlens::export::ReportExporter;
use crashlens::pipeline::Pipeline;
use crashlens::report::write_report;
use crashlens::symbolization::NoDemangler;

const FIXTURE_MAP: &str = include_str!("fixtures/game.map");
const OLD_FORMAT_LOG: &str = include_str!("fixtures/crash_old_format.log");

fn report() -> crashlens::report::Report {
    let config = PipelineConfig { data_root: "/data".into(), ..PipelineConfig::default() };
    let probe = KnownFiles::new(["/data/ui/main.dta"]);
    Pipeline::new(&config, NoDemangler, probe).unwrap().run(FIXTURE_MAP, OLD_FORMAT_LOG).unwrap()
}

#[test]
fn test_export_creates_valid_json() {
    let report = report();

    let mut buffer = Vec::new();
    ReportExporter::new(&report).export(&mut buffer).expect("Failed to export report");

    let json_str = String::from_utf8(buffer).expect("Invalid UTF-8");
    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Invalid JSON");

    assert_eq!(parsed["symbolCount"], 8);
    let body = &parsed["report"];
    assert_eq!(body["stack_trace"]["format"], "old");
    assert_eq!(body["stack_trace"]["frames"].as_array().unwrap().len(), 5);
    assert_eq!(body["stack_trace"]["frames"][0]["symbol_name"], "Fail__FPCce");
    assert_eq!(body["stack_trace"]["frames"][0]["demangled_name"], serde_json::Value::Null);
    assert_eq!(body["reference_source"], "gated");
    assert_eq!(body["corrections"][0]["from"], "ui/mian.dta");
    assert_eq!(body["uncorrectable"][0]["path"], "config/missing.dta");
}

#[test]
fn test_text_report_sections() {
    let report = report();

    let mut buffer = Vec::new();
    write_report(&report, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.contains("=== Resolved Stack Trace ===\n\n80003434: Fail__FPCce\n"));
    assert!(text.contains(" • Data file missing"));
    assert!(text.contains("=== Data File References ===\n\n config/missing.dta @ line 3\n"));
    assert!(text.contains(" ui/mian.dta -> ui/main.dta (line 12)"));
    assert!(text.contains("=== Missing Data Files ===\n\n config/missing.dta @ line 3"));
}
