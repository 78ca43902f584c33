use organpair_cli::run;
use organpair_engine::catalog::Catalog;

fn deal(args: &[&str]) -> String {
    let mut argv = vec!["organpair", "deal"];
    argv.extend_from_slice(args);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(argv, &mut out, &mut err);
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    String::from_utf8(out).unwrap()
}

#[test]
fn seeded_deal_is_reproducible() {
    assert_eq!(deal(&["--seed", "42"]), deal(&["--seed", "42"]));
    assert_ne!(deal(&["--seed", "42"]), deal(&["--seed", "4242"]));
}

#[test]
fn every_item_appears_once_per_face() {
    let catalog = Catalog::default();
    let text = deal(&["--seed", "3"]);
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), catalog.len() * 2);
    for item in catalog.items() {
        let organ = format!("ORGAN     {}", item.name);
        let function = format!("FUNCTION  {}", item.function);
        assert_eq!(rows.iter().filter(|r| r.ends_with(&organ)).count(), 1);
        assert_eq!(rows.iter().filter(|r| r.ends_with(&function)).count(), 1);
    }
}

#[test]
fn board_positions_are_numbered_from_one() {
    let text = deal(&["--seed", "3", "--level", "2"]);
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert!(rows[0].starts_with("[ 1]"));
    assert!(rows[rows.len() - 1].starts_with(&format!("[{:>2}]", rows.len())));
}
