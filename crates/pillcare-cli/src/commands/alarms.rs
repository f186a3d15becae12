use pillcare_core::Result;
use pillcare_core::treatment::evenly_spaced_alarms;

pub fn generate(frequency: i32) -> Result<()> {
    let alarms = evenly_spaced_alarms(frequency)?;

    println!("{} alarms per day:", alarms.len());
    for alarm in &alarms {
        println!("  {}  {}", alarm.time, alarm.description);
    }
    Ok(())
}
