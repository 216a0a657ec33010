//! Print a numbered list of the spooler's printers and the default printer.

use labelprint::{CupsSpooler, Spooler};

fn main() {
    env_logger::init();

    let spooler = CupsSpooler::new();

    let printers = match spooler.printers() {
        Ok(printers) => printers,
        Err(err) => {
            eprintln!("プリンター一覧を取得できません: {}", err);
            std::process::exit(1);
        }
    };

    println!("接続されているプリンター一覧:");
    for (i, printer) in printers.iter().enumerate() {
        println!("{}. {}", i + 1, printer);
    }

    match spooler.default_printer() {
        Ok(Some(name)) => println!("\nデフォルトプリンター: {}", name),
        Ok(None) => println!("\nデフォルトプリンター: なし"),
        Err(err) => {
            eprintln!("デフォルトプリンターを取得できません: {}", err);
            std::process::exit(1);
        }
    }
}
