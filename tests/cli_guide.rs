use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn command_guide_newick() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("pmsa");
    let output = cmd.arg("guide").arg("tests/pmsa/small.fa").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 1);
    assert_eq!(stdout, "((a1,a2),(b1,b2));\n");

    Ok(())
}

#[test]
fn command_guide_lengths() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("pmsa");
    let output = cmd
        .arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--lengths")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // identical sequences join at height 0
    assert!(stdout.starts_with("((a1:0,a2:0):"));
    assert!(stdout.contains("(b1:0,b2:0):"));

    Ok(())
}

#[test]
fn command_guide_cluster() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("pmsa");
    let output = cmd
        .arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--format")
        .arg("cluster")
        .arg("--parallel")
        .arg("2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let ids: Vec<&str> = stdout.lines().filter(|l| l.starts_with('>')).collect();
    assert_eq!(ids, vec![">a1", ">a2", ">b1", ">b2"]);
    assert!(stdout.contains(">a2\nMKVLAAGIVGLLLAQ\n"));

    Ok(())
}

#[test]
fn command_guide_merge() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("pmsa");
    let output = cmd
        .arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--format")
        .arg("merge")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("1\ta1\ta2\t0.000000\ta1,a2\t"));
    assert!(lines[1].starts_with("2\tb1\tb2\t0.000000\tb1,b2\t"));
    assert!(lines[2].starts_with("3\ta1,a2\tb1,b2\t"));

    Ok(())
}

#[test]
fn command_guide_matrix() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("guide.nwk");

    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--matrix")
        .arg("tests/pmsa/small.phy")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let nwk = std::fs::read_to_string(&output)?;
    // rows are matched by name, not by position in the file
    assert_eq!(nwk, "((a1,b1),(a2,b2));\n");

    Ok(())
}

#[test]
fn command_guide_single() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/single.fa")
        .assert()
        .success()
        .stdout("only;\n");

    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/single.fa")
        .arg("--format")
        .arg("merge")
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[test]
fn command_guide_empty() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/empty.fa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sequences to cluster"));

    Ok(())
}

#[test]
fn command_guide_matrix_mismatch() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("input.phy");
    std::fs::write(&input, "2\na1 0 1\nzz 1 0\n")?;

    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--matrix")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match the distance matrix"));

    Ok(())
}

#[test]
fn command_guide_matrix_malformed() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("input.phy");
    std::fs::write(&input, "4\na1 0 1 1 1\na2 1 0 1\nb1 1 1 0 1\nb2 1 1 1 0\n")?;

    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--matrix")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row [a2] has 3 distances"));

    let missing = temp.path().join("missing.phy");
    let mut cmd = cargo_bin_cmd!("pmsa");
    cmd.arg("guide")
        .arg("tests/pmsa/small.fa")
        .arg("--matrix")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not open"));

    Ok(())
}
