pub mod adrenal_crisis;
pub mod anaphylaxis;
pub mod appendicitis;
pub mod asthma;
pub mod bronchiolitis;
pub mod burns;
pub mod cardiac_arrest;
pub mod croup;
pub mod dehydration;
pub mod dengue;
pub mod diabetic_ketoacidosis;
pub mod fever_without_source;
pub mod hyperkalemia;
pub mod hypoglycemia;
pub mod meningitis;
pub mod neonatal_jaundice;
pub mod pain;
pub mod pharyngitis;
pub mod pneumonia;
pub mod rsi;
pub mod sepsis;
pub mod status_epilepticus;
pub mod tbi;
pub mod trauma_score;
pub mod uti;
