//! Show a few capabilities of the current terminal.

use std::{error::Error, io::{self, Write}};

use tinfo::{Param, caps};

fn main() -> Result<(), Box<dyn Error>> {
    let ti = tinfo::load_env()?;
    println!("terminal: {}", ti.names.join("|"));
    println!("columns:  {}", ti.numbers[caps::COLUMNS]);
    println!("colors:   {}", ti.numbers[caps::MAX_COLORS]);

    let goto = ti.goto(3, 7);
    println!("goto(3, 7) = {:?}", String::from_utf8_lossy(&goto));

    let mut stdout = io::stdout();
    stdout.write_all(&ti.color(2, -1))?;
    print!("green");
    stdout.write_all(&ti.parm(caps::EXIT_ATTRIBUTE_MODE, &[]))?;
    println!(" and back");

    if let Some(smulx) = ti.ext_strings.get("Smulx") {
        let curly = tinfo::expand(smulx, &[Param::from(3)]);
        println!("styled underline: {:?}", String::from_utf8_lossy(&curly));
    }
    Ok(())
}
