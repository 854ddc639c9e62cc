//! [`Roster`] — the authoritative in-memory personnel store.
//!
//! The roster exclusively owns the employee and subcontractor collections.
//! Newly added records surface first. Every mutating operation is a single
//! synchronous step: it either fully succeeds or leaves the collections
//! untouched.
//!
//! Capacity edits go through the reconciler, which maintains the invariant
//! that a subcontractor id's numeric band always matches the record's stored
//! capacity, and that a `both` selection is always materialised as exactly
//! two records sharing one identity.

use std::collections::HashSet;

use crate::{
  Error, Result,
  capacity::DnrCapacity,
  id::{EmployeeId, SubcontractorId, next_employee_id, next_subcontractor_id},
  person::{Employee, PersonInput, Subcontractor, SubcontractorInput},
};

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Roster {
  employees:      Vec<Employee>,
  subcontractors: Vec<Subcontractor>,
}

impl Roster {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a roster from pre-existing records (seed data). Rejects duplicate
  /// ids within either collection; the two collections are disjoint id
  /// spaces and never collide with each other.
  pub fn from_records(
    employees: Vec<Employee>,
    subcontractors: Vec<Subcontractor>,
  ) -> Result<Self> {
    let mut seen = HashSet::new();
    for e in &employees {
      if !seen.insert(e.id.as_str()) {
        return Err(Error::DuplicateId(e.id.to_string()));
      }
    }
    let mut seen = HashSet::new();
    for s in &subcontractors {
      if !seen.insert(s.id.as_str()) {
        return Err(Error::DuplicateId(s.id.to_string()));
      }
    }
    Ok(Self { employees, subcontractors })
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub fn employees(&self) -> &[Employee] {
    &self.employees
  }

  pub fn subcontractors(&self) -> &[Subcontractor] {
    &self.subcontractors
  }

  /// Snapshot of the subcontractor collection, optionally restricted to one
  /// capacity class. Calling this twice without an intervening mutation
  /// returns identical sequences.
  pub fn list_subcontractors(
    &self,
    capacity: Option<DnrCapacity>,
  ) -> Vec<Subcontractor> {
    self
      .subcontractors
      .iter()
      .filter(|s| capacity.is_none_or(|c| s.dnr_capacity == c))
      .cloned()
      .collect()
  }

  pub fn find_subcontractor(
    &self,
    id: &SubcontractorId,
  ) -> Option<&Subcontractor> {
    self.subcontractors.iter().find(|s| &s.id == id)
  }

  // ── Employees ─────────────────────────────────────────────────────────

  /// Add an in-house employee under a freshly allocated `emp<N>` id.
  pub fn add_employee(&mut self, input: PersonInput) -> Result<Employee> {
    let employee = Employee {
      id:        next_employee_id(&self.employees)?,
      name:      input.name,
      work_type: input.work_type,
      contact:   input.contact,
    };
    self.employees.insert(0, employee.clone());
    Ok(employee)
  }

  /// Replace an employee's fields in place. The id is immutable.
  pub fn update_employee(
    &mut self,
    id: &EmployeeId,
    input: PersonInput,
  ) -> Result<Employee> {
    let employee = self
      .employees
      .iter_mut()
      .find(|e| &e.id == id)
      .ok_or_else(|| Error::NotFound(id.to_string()))?;
    employee.name = input.name;
    employee.work_type = input.work_type;
    employee.contact = input.contact;
    Ok(employee.clone())
  }

  // ── Subcontractors ────────────────────────────────────────────────────

  /// Add a subcontractor. A concrete capacity choice creates one record;
  /// `both` creates two, one per concrete class, sharing name, work type,
  /// and contact but with distinct ids.
  pub fn add_subcontractor(
    &mut self,
    input: SubcontractorInput,
  ) -> Result<Vec<Subcontractor>> {
    let classes: &[DnrCapacity] = match input.dnr_capacity.concrete() {
      Some(capacity) => &[capacity],
      None => &[DnrCapacity::Dnr300, DnrCapacity::Dnr600],
    };

    // Allocate every id before inserting anything so a band running out
    // of ids leaves the roster untouched.
    let mut created = Vec::with_capacity(classes.len());
    for &class in classes {
      created.push(Subcontractor {
        id:           next_subcontractor_id(class, &self.subcontractors)?,
        name:         input.name.clone(),
        work_type:    input.work_type.clone(),
        contact:      input.contact.clone(),
        dnr_capacity: class,
      });
    }
    for record in &created {
      self.subcontractors.insert(0, record.clone());
    }
    Ok(created)
  }

  /// Edit a subcontractor, reconciling any capacity change. Returns the
  /// record(s) the person is represented by after the edit.
  pub fn update_subcontractor(
    &mut self,
    id: &SubcontractorId,
    input: SubcontractorInput,
  ) -> Result<Vec<Subcontractor>> {
    let current = self
      .subcontractors
      .iter()
      .find(|s| &s.id == id)
      .cloned()
      .ok_or_else(|| Error::NotFound(id.to_string()))?;

    match input.dnr_capacity.concrete() {
      Some(target) => self.reconcile_specific(current, target, &input),
      None => self.reconcile_both(current, &input),
    }
  }

  /// Delete from whichever collection holds `id`.
  pub fn delete_person(&mut self, id: &str) -> Result<()> {
    if let Some(pos) = self.employees.iter().position(|e| e.id.as_str() == id)
    {
      self.employees.remove(pos);
      return Ok(());
    }
    if let Some(pos) =
      self.subcontractors.iter().position(|s| s.id.as_str() == id)
    {
      self.subcontractors.remove(pos);
      return Ok(());
    }
    Err(Error::NotFound(id.to_string()))
  }

  // ── Reconciler ────────────────────────────────────────────────────────

  /// Ids of the records that form a `both` pair with `record`: same
  /// identity fields, different id.
  fn paired_ids(&self, record: &Subcontractor) -> Vec<SubcontractorId> {
    self
      .subcontractors
      .iter()
      .filter(|s| record.is_paired_with(s))
      .map(|s| s.id.clone())
      .collect()
  }

  /// Edit to a single concrete capacity. The edited record keeps its id
  /// when the id's band already matches the target, and is re-keyed
  /// otherwise. Any counterpart left over from an earlier `both` split is
  /// removed: after a specific edit the person has exactly one record.
  fn reconcile_specific(
    &mut self,
    current: Subcontractor,
    target: DnrCapacity,
    input: &SubcontractorInput,
  ) -> Result<Vec<Subcontractor>> {
    let paired = self.paired_ids(&current);

    let updated = if current.id.in_range(target) {
      Subcontractor {
        id:           current.id.clone(),
        name:         input.name.clone(),
        work_type:    input.work_type.clone(),
        contact:      input.contact.clone(),
        dnr_capacity: target,
      }
    } else {
      let id = next_subcontractor_id(target, &self.subcontractors)?;
      if self.subcontractors.iter().any(|s| s.id == id) {
        return Err(Error::InvalidCapacityTransition(format!(
          "allocated id {id} already exists"
        )));
      }
      Subcontractor {
        id,
        name:         input.name.clone(),
        work_type:    input.work_type.clone(),
        contact:      input.contact.clone(),
        dnr_capacity: target,
      }
    };

    self.commit(&current, &paired, vec![updated])
  }

  /// Edit to `both`: the person must end up as exactly two records, one per
  /// concrete class. Each class is represented by the edited record if its
  /// id is already in that class's band, else by an existing pair member in
  /// the band, else by a freshly allocated id. Pair members representing
  /// neither class are removed.
  fn reconcile_both(
    &mut self,
    current: Subcontractor,
    input: &SubcontractorInput,
  ) -> Result<Vec<Subcontractor>> {
    let paired = self.paired_ids(&current);

    let mut finals = Vec::with_capacity(2);
    let mut current_placed = false;
    for class in [DnrCapacity::Dnr300, DnrCapacity::Dnr600] {
      let kept_id = if !current_placed && current.id.in_range(class) {
        current_placed = true;
        Some(current.id.clone())
      } else {
        paired.iter().find(|p| p.in_range(class)).cloned()
      };
      let id = match kept_id {
        Some(id) => id,
        None => next_subcontractor_id(class, &self.subcontractors)?,
      };
      finals.push(Subcontractor {
        id,
        name:         input.name.clone(),
        work_type:    input.work_type.clone(),
        contact:      input.contact.clone(),
        dnr_capacity: class,
      });
    }

    // Guard: the two final ids must be distinct, and a freshly allocated id
    // must not collide with a record outside the edited pair.
    if finals[0].id == finals[1].id {
      return Err(Error::InvalidCapacityTransition(format!(
        "both expansion resolved to a single id {}",
        finals[0].id
      )));
    }
    for record in &finals {
      let kept =
        record.id == current.id || paired.iter().any(|p| *p == record.id);
      if !kept && self.subcontractors.iter().any(|s| s.id == record.id) {
        return Err(Error::InvalidCapacityTransition(format!(
          "allocated id {} already exists",
          record.id
        )));
      }
    }

    self.commit(&current, &paired, finals)
  }

  /// Apply a reconciled edit: overwrite surviving records in place, drop the
  /// edited record and pair members that did not survive, and surface brand
  /// new records at the front.
  fn commit(
    &mut self,
    current: &Subcontractor,
    paired: &[SubcontractorId],
    finals: Vec<Subcontractor>,
  ) -> Result<Vec<Subcontractor>> {
    for existing in self.subcontractors.iter_mut() {
      if let Some(record) = finals.iter().find(|f| f.id == existing.id) {
        *existing = record.clone();
      }
    }
    self.subcontractors.retain(|s| {
      finals.iter().any(|f| f.id == s.id)
        || (s.id != current.id && !paired.contains(&s.id))
    });
    for record in finals.iter().rev() {
      if !self.subcontractors.iter().any(|s| s.id == record.id) {
        self.subcontractors.insert(0, record.clone());
      }
    }
    Ok(finals)
  }
}
