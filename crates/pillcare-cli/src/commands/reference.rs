use colored::Colorize;
use pillcare_application::TreatmentFormState;
use pillcare_core::Result;
use pillcare_interaction::ApiClient;

pub async fn patients(client: &ApiClient) -> Result<()> {
    let patients = client.list_patients().await?;
    if patients.is_empty() {
        println!("No patients");
    }
    for patient in &patients {
        println!("{:>5}  {}", patient.id, patient.name);
    }
    Ok(())
}

/// Goes through the form loader so the builtin fallback applies here too.
pub async fn medications(client: &ApiClient) -> Result<()> {
    let mut form = TreatmentFormState::new(client.clone());
    let reference = form.load_reference_data().await?;

    if reference.is_degraded() {
        println!(
            "{}",
            "Medication catalog unavailable on the server, showing builtin list".yellow()
        );
    }
    for medication in &reference.medications {
        println!(
            "{:>5}  {} {}",
            medication.id,
            medication.name,
            medication.strength.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}
