//! The historical sample data set, spelled exactly as it was in the legacy
//! system (dash-form subcontractor ids, `emp-` employee ids). Loading it
//! exercises the legacy id parser.

use bandtrack_core::{
  Result,
  capacity::DnrCapacity,
  id::{EmployeeId, SubcontractorId},
  ledger::{Ledger, NewDispatch, NewReturn, QualityStatus},
  person::{Employee, Subcontractor},
  roster::Roster,
};

pub fn sample_roster() -> Result<Roster> {
  let employee = |id: &str, name: &str, work_type: &str, contact: &str| {
    Ok::<_, bandtrack_core::Error>(Employee {
      id:        EmployeeId::parse(id)?,
      name:      name.to_string(),
      work_type: work_type.to_string(),
      contact:   contact.to_string(),
    })
  };
  let sub = |id: &str,
             name: &str,
             work_type: &str,
             contact: &str,
             capacity: DnrCapacity| {
    Ok::<_, bandtrack_core::Error>(Subcontractor {
      id: SubcontractorId::parse(id)?,
      name: name.to_string(),
      work_type: work_type.to_string(),
      contact: contact.to_string(),
      dnr_capacity: capacity,
    })
  };

  let employees = vec![
    employee("emp-2", "Bob The Builder", "Cutting", "555-0101")?,
    employee("emp-4", "Diana Prince", "Quality Check", "555-0103")?,
  ];

  // Edward Scissorhands was entered as "both" and is stored split in two.
  let subcontractors = vec![
    sub("6-1", "Alice Wonderland", "Sewing", "555-0100", DnrCapacity::Dnr600)?,
    sub("3-2", "Charlie Chaplin", "Embroidery", "555-0102", DnrCapacity::Dnr300)?,
    sub("3-3", "Edward Scissorhands", "Pattern Making", "555-0104", DnrCapacity::Dnr300)?,
    sub("6-4", "Edward Scissorhands", "Pattern Making", "555-0104", DnrCapacity::Dnr600)?,
    sub("S-5", "Fiona Gallagher", "Finishing", "555-0105", DnrCapacity::Unspecified)?,
  ];

  Roster::from_records(employees, subcontractors)
}

pub fn sample_ledger(roster: &Roster) -> Result<Ledger> {
  let mut ledger = Ledger::new();

  let name = |id: &SubcontractorId| {
    roster.find_subcontractor(id).map(|s| s.name.clone())
  };

  let alice = SubcontractorId::parse("6-1")?;
  let charlie = SubcontractorId::parse("3-2")?;

  ledger.log_dispatch(
    NewDispatch {
      subcontractor_id: alice.clone(),
      material_type:    "Fabric A".to_string(),
      quantity:         100,
    },
    name(&alice),
  );
  ledger.log_dispatch(
    NewDispatch {
      subcontractor_id: charlie.clone(),
      material_type:    "Threads".to_string(),
      quantity:         50,
    },
    name(&charlie),
  );

  ledger.log_return(
    NewReturn {
      subcontractor_id: alice.clone(),
      quantity:         95,
      quality_status:   QualityStatus::Good,
    },
    name(&alice),
  );
  ledger.log_return(
    NewReturn {
      subcontractor_id: charlie.clone(),
      quantity:         5,
      quality_status:   QualityStatus::Damaged,
    },
    name(&charlie),
  );

  Ok(ledger)
}
