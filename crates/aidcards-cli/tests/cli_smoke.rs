use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "aidcards-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_aidcards<I, S>(cwd: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_aidcards");
    Command::new(bin)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("aidcards command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be valid json ({e}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) {
    let text = serde_json::to_string_pretty(value).expect("fixture should serialize");
    fs::write(dir.join(name), text).expect("fixture should be written");
}

fn card(card_id: &str, stage: &str, province: Value) -> Value {
    json!({
        "card_id": card_id,
        "title": "国家助学贷款",
        "level": "bank",
        "region": "全国",
        "province": province,
        "stage": [stage],
        "category": "loan",
        "education_level": ["undergrad"],
        "eligible_text": "家庭经济困难学生",
        "requires_financial_assessment": false,
        "benefit_summary": "每年最高20000元",
        "application_window_text": "每年7月至9月",
        "application_steps": ["在线申请", "县资助中心办理"],
        "apply_portals": [{"name": "国家开发银行", "url": "https://www.csls.cdb.com.cn/"}],
        "materials": [],
        "tongji_mapping_text": "学生资助管理中心",
        "evidence_list": [{
            "source_name": "国家开发银行",
            "url": "https://www.csls.cdb.com.cn/",
            "verified_date": "2026-02-10",
        }],
        "status": "verified",
        "priority": "P1",
        "last_updated": "2026-02-10",
    })
}

fn write_data_dir(dir: &Path, cards: Vec<Value>) {
    let ids: Vec<Value> = cards.iter().map(|c| c["card_id"].clone()).collect();
    fs::create_dir_all(dir).expect("data dir should be created");
    write_json(dir, "policycards.json", &Value::Array(cards));
    write_json(
        dir,
        "provinces.json",
        &json!([{"name": "安徽", "slug": "anhui", "aliases": ["皖"], "order": 1}]),
    );
    write_json(
        dir,
        "sourcesites.json",
        &json!([{
            "source_id": "src-国家开发银行",
            "name": "国家开发银行",
            "scope_level": "bank",
            "region": "全国",
            "homepage_url": "https://www.csls.cdb.com.cn/",
            "policy_index_urls": [],
            "contact_urls": [],
            "update_frequency": "不定期",
            "priority": "P0",
            "notes": "由证据链自动生成",
        }]),
    );
    write_json(
        dir,
        "changelog.json",
        &json!([{"date": "2026-02-11", "type": "init", "summary": "首批", "card_ids": ids}]),
    );
}

fn write_workbook(path: &Path) {
    let cards: &[(&str, &str)] = &[
        ("card_id", "ah-loan"),
        ("title", "生源地信用助学贷款"),
        ("level", "bank"),
        ("region", "安徽"),
        ("province", "anhui"),
        ("stage", "pre_admission,enrollment_day"),
        ("category", "loan"),
        ("education_level", "undergrad"),
        ("eligible_text", "家庭经济困难学生"),
        ("requires_financial_assessment", "是"),
        ("benefit_summary", "每年最高20000元"),
        ("application_window_text", "每年7月"),
        ("application_steps", "在线申请\n县资助中心办理"),
        ("apply_portals", "国家开发银行 | https://www.csls.cdb.com.cn/"),
        ("materials", "身份证"),
        ("tongji_mapping_text", "学生资助管理中心"),
        ("status", "verified"),
        ("last_updated", "2026-02-10"),
    ];
    let evidence: &[(&str, &str)] = &[
        ("card_id", "ah-loan"),
        ("source_name", "国家开发银行"),
        ("url", "https://www.csls.cdb.com.cn/index.html"),
        ("verified_date", "2026-02-10"),
    ];

    let mut workbook = rust_xlsxwriter::Workbook::new();
    for (name, columns, values) in [
        (
            aidcards_convert::POLICY_CARDS_SHEET,
            aidcards_convert::POLICY_CARD_COLUMNS,
            cards,
        ),
        (
            aidcards_convert::EVIDENCE_SHEET,
            aidcards_convert::EVIDENCE_COLUMNS,
            evidence,
        ),
    ] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).expect("sheet name should be valid");
        for (col, column) in columns.iter().enumerate() {
            let col = u16::try_from(col).expect("column index fits");
            sheet
                .write_string(0, col, *column)
                .expect("header should be written");
            if let Some((_, value)) = values.iter().find(|(key, _)| key == column) {
                sheet
                    .write_string(1, col, *value)
                    .expect("cell should be written");
            }
        }
    }
    workbook.save(path).expect("workbook should be saved");
}

#[test]
fn validate_passes_on_clean_data() {
    let temp = TempDirGuard::new("validate-pass");
    let data = temp.path().join("src/data");
    write_data_dir(&data, vec![card("nat-loan", "pre_admission", Value::Null)]);

    let output = run_aidcards(temp.path(), ["validate"]);
    assert_success(&output);
    assert_eq!(stdout_text(&output), "[PASS] validate passed\n");
}

#[test]
fn validate_reports_every_violation_and_exits_one() {
    let temp = TempDirGuard::new("validate-fail");
    let data = temp.path().join("data");
    let mut broken = card("nat-loan", "pre_admission", Value::Null);
    broken["status"] = json!("published");
    write_data_dir(&data, vec![broken.clone(), broken]);

    let output = run_aidcards(temp.path(), ["validate", "--data-dir", "data"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_text(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"ERROR: Duplicate card_id: ["nat-loan"]"#,
            "ERROR: nat-loan: invalid status published",
            "ERROR: nat-loan: invalid status published",
        ]
    );
}

#[test]
fn validate_json_report_shape() {
    let temp = TempDirGuard::new("validate-json");
    let data = temp.path().join("data");
    write_data_dir(&data, vec![card("nat-loan", "pre_admission", Value::Null)]);
    fs::remove_file(data.join("sourcesites.json")).expect("fixture removal");

    let output = run_aidcards(temp.path(), ["validate", "--data-dir", "data", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let report = parse_json_stdout(&output);
    assert_eq!(report["checkKind"], "aidcards.data.validate.v1");
    assert_eq!(report["result"], "rejected");
    assert_eq!(report["failureClasses"], json!(["collection.missing"]));
    assert_eq!(report["summary"]["missingCollections"], json!(["sourcesites"]));
    assert_eq!(report["violations"][0]["collection"], "sourcesites");
}

#[test]
fn build_converts_then_validates() {
    let temp = TempDirGuard::new("build");
    write_workbook(&temp.path().join("cards.xlsx"));
    fs::write(
        temp.path().join("aidcards.toml"),
        "[paths]\nworkbook = \"cards.xlsx\"\ndata_dir = \"public/data\"\n\n[changelog]\ndate = \"2026-02-11\"\n",
    )
    .expect("config should be written");

    let output = run_aidcards(temp.path(), ["build"]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    assert!(stdout.starts_with("✅ Exported JSON to: "), "stdout: {stdout}");
    assert!(stdout.ends_with("[PASS] validate passed\n"), "stdout: {stdout}");

    let data = temp.path().join("public/data");
    for name in [
        "policycards.json",
        "provinces.json",
        "sourcesites.json",
        "glossary.json",
        "faqs.json",
        "changelog.json",
    ] {
        assert!(data.join(name).exists(), "{name} should be written");
    }
    let changelog: Value =
        serde_json::from_slice(&fs::read(data.join("changelog.json")).expect("changelog"))
            .expect("changelog json");
    assert_eq!(changelog[0]["date"], "2026-02-11");
    assert_eq!(changelog[0]["card_ids"], json!(["ah-loan"]));
}

#[test]
fn show_and_summary_read_the_catalog() {
    let temp = TempDirGuard::new("catalog");
    let data = temp.path().join("data");
    write_data_dir(
        &data,
        vec![
            card("nat-loan", "pre_admission", Value::Null),
            card("ah-grant", "after_enrollment", json!("anhui")),
            card("js-grant", "after_enrollment", json!("jiangsu")),
        ],
    );

    let shown = run_aidcards(temp.path(), ["show", "ah-grant", "--data-dir", "data"]);
    assert_success(&shown);
    assert_eq!(parse_json_stdout(&shown)["card_id"], "ah-grant");

    let missing = run_aidcards(temp.path(), ["show", "nope", "--data-dir", "data"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(stderr_text(&missing).contains("card `nope` not found"));

    let summary = run_aidcards(
        temp.path(),
        ["summary", "--data-dir", "data", "--province", "anhui", "--json"],
    );
    assert_success(&summary);
    let summary = parse_json_stdout(&summary);
    assert_eq!(summary["cardCount"], 2);
    assert_eq!(summary["cardsByStage"][0], json!({"stage": "pre_admission", "cards": 1}));
}

#[test]
fn operational_errors_exit_two() {
    let temp = TempDirGuard::new("errors");

    let output = run_aidcards(temp.path(), ["convert", "missing.xlsx"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_text(&output).starts_with("error: workbook not found"));

    let output = run_aidcards(temp.path(), ["validate", "--config", "absent.toml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_text(&output).contains("failed to read config"));

    fs::write(temp.path().join("aidcards.toml"), "[unknown]\nkey = 1\n")
        .expect("config should be written");
    let output = run_aidcards(temp.path(), ["validate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_text(&output).contains("invalid config"));
}

#[test]
fn validate_rejects_what_summary_cannot_load() {
    let temp = TempDirGuard::new("typed");
    let data = temp.path().join("data");
    let mut broken = card("nat-loan", "pre_admission", Value::Null);
    broken["title"] = Value::Null;
    broken["benefit_money_min"] = json!("约2000");
    write_data_dir(&data, vec![broken]);

    let validate = run_aidcards(temp.path(), ["validate", "--data-dir", "data"]);
    assert_eq!(validate.status.code(), Some(1));
    assert_eq!(
        stdout_text(&validate).lines().collect::<Vec<_>>(),
        vec![
            "ERROR: nat-loan: title must be a string, got null",
            r#"ERROR: nat-loan: benefit_money_min must be a number or null, got "约2000""#,
        ]
    );
    let summary = run_aidcards(temp.path(), ["summary", "--data-dir", "data"]);
    assert_eq!(summary.status.code(), Some(2));

    let mut fixed = card("nat-loan", "pre_admission", Value::Null);
    fixed["benefit_money_min"] = json!(2000);
    write_data_dir(&data, vec![fixed]);
    assert_success(&run_aidcards(temp.path(), ["validate", "--data-dir", "data"]));
    let summary = run_aidcards(temp.path(), ["summary", "--data-dir", "data", "--json"]);
    assert_success(&summary);
    assert_eq!(parse_json_stdout(&summary)["incompleteEvidenceCards"], 0);
}

fn catalog_dir(dir: &Path) {
    let mut grant = card("ah-grant", "after_enrollment", json!("anhui"));
    grant["title"] = json!("安徽省政府助学金");
    grant["category"] = json!("grant");
    grant["priority"] = json!("P0");
    grant["tags"] = json!(["Anhui"]);
    write_data_dir(
        dir,
        vec![
            card("nat-loan", "pre_admission", Value::Null),
            grant,
            card("js-grant", "after_enrollment", json!("jiangsu")),
        ],
    );
}

#[test]
fn list_filters_and_sorts_cards() {
    let temp = TempDirGuard::new("list");
    catalog_dir(&temp.path().join("data"));

    let sorted = run_aidcards(
        temp.path(),
        [
            "list",
            "--data-dir",
            "data",
            "--province",
            "anhui",
            "--sort",
            "priority",
            "--json",
        ],
    );
    assert_success(&sorted);
    let listing = parse_json_stdout(&sorted);
    assert_eq!(listing["cardCount"], 2);
    assert_eq!(listing["cards"][0]["card_id"], "ah-grant");
    assert_eq!(listing["cards"][1]["card_id"], "nat-loan");
    assert_eq!(listing["latestVerifiedDate"], "2026-02-10");

    let searched = run_aidcards(
        temp.path(),
        ["list", "--data-dir", "data", "--search", "ANHUI", "--assessment", "false"],
    );
    assert_success(&searched);
    assert_eq!(
        stdout_text(&searched),
        "[list] cards=1 latest verified: 2026-02-10\n  ah-grant  P0  grant  安徽省政府助学金\n"
    );

    let unknown = run_aidcards(temp.path(), ["list", "--data-dir", "data", "--stage", "someday"]);
    assert_eq!(unknown.status.code(), Some(2));
    assert!(stderr_text(&unknown).starts_with("error: unknown stage value `someday`"));
}

#[test]
fn plan_groups_cards_by_stage() {
    let temp = TempDirGuard::new("plan");
    catalog_dir(&temp.path().join("data"));

    let plan = run_aidcards(
        temp.path(),
        [
            "plan",
            "--data-dir",
            "data",
            "--province",
            "anhui",
            "--stage",
            "pre_admission",
        ],
    );
    assert_success(&plan);
    let text = stdout_text(&plan);
    assert!(
        text.starts_with(
            "=== 我的资助行动清单 ===\n省份：安徽\n身份阶段：入学前（在安徽办）\n匹配项目数：1\n\n【入学前（在安徽办）】\n  ■ 国家助学贷款（贷款）\n"
        ),
        "plan: {text}"
    );
    assert!(text.contains("    入口：国家开发银行 https://www.csls.cdb.com.cn/\n"));

    let chosen = run_aidcards(temp.path(), ["plan", "ah-grant", "--data-dir", "data"]);
    assert_success(&chosen);
    let text = stdout_text(&chosen);
    assert!(text.contains("省份：全国\n匹配项目数：1\n"), "plan: {text}");
    assert!(text.contains("【入学后（同济申请）】\n  ■ 安徽省政府助学金（助学金）\n"));

    let missing = run_aidcards(temp.path(), ["plan", "ghost", "--data-dir", "data"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(stderr_text(&missing).contains("card `ghost` not found"));
}
