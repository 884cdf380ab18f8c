//! Partition of individuals into fixed-capacity groups.

use tracing::warn;

/// Position of one member: group index plus slot index within that group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub group: usize,
    pub index: usize,
}

impl Slot {
    pub fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }
}

/// One group (room) with an ordered member sequence.
///
/// Member order matters for scoring: each pair is rated by its
/// lower-indexed member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group number, equal to its position in the assignment.
    pub id: usize,
    /// Individual ids, exactly `capacity` of them.
    pub members: Vec<usize>,
}

/// Arena of equally sized groups addressed by index.
///
/// Built once by [`Assignment::sequential`] and afterwards mutated only
/// through [`Assignment::swap`], which keeps every group at capacity and
/// every individual in exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    capacity: usize,
    population: usize,
    groups: Vec<Group>,
}

impl Assignment {
    /// Slices ids `0..population`, in order, into consecutive blocks of
    /// `capacity`.
    ///
    /// When `population` is not a multiple of `capacity` the trailing
    /// `population % capacity` individuals are left out of every group.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_rooming::model::Assignment;
    ///
    /// let a = Assignment::sequential(10, 4);
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(a.groups()[1].members, vec![4, 5, 6, 7]);
    /// assert_eq!(a.excluded(), vec![8, 9]);
    /// ```
    pub fn sequential(population: usize, capacity: usize) -> Self {
        let group_count = if capacity == 0 { 0 } else { population / capacity };
        let groups = (0..group_count)
            .map(|id| Group {
                id,
                members: (id * capacity..(id + 1) * capacity).collect(),
            })
            .collect();

        let assignment = Self {
            capacity,
            population,
            groups,
        };
        let excluded = assignment.excluded();
        if !excluded.is_empty() {
            warn!(
                population,
                capacity,
                excluded = excluded.len(),
                "population not divisible by capacity; trailing individuals left unassigned"
            );
        }
        assignment
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of individuals the assignment was built from.
    pub fn population(&self) -> usize {
        self.population
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Occupant of `slot`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is out of range.
    pub fn member(&self, slot: Slot) -> usize {
        self.groups[slot.group].members[slot.index]
    }

    /// Exchanges the occupants of two slots.
    ///
    /// Both slots may lie in the same group; swapping a slot with itself
    /// leaves the assignment unchanged.
    ///
    /// # Panics
    ///
    /// Panics if either slot is out of range.
    pub fn swap(&mut self, a: Slot, b: Slot) {
        if a.group == b.group {
            self.groups[a.group].members.swap(a.index, b.index);
        } else {
            let first = self.groups[a.group].members[a.index];
            let second = std::mem::replace(&mut self.groups[b.group].members[b.index], first);
            self.groups[a.group].members[a.index] = second;
        }
    }

    /// All assigned ids in group-then-slot order.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().flat_map(|g| g.members.iter().copied())
    }

    /// Ids that were never placed in a group.
    pub fn excluded(&self) -> Vec<usize> {
        (self.groups.len() * self.capacity..self.population).collect()
    }
}
