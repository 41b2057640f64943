//! Polynomial-time lower bounds (spec §4.6): cheap dual certificates used
//! to report an optimality gap alongside a heuristic's upper bound, and
//! exposed as free-standing `--algorithm` values (spec §6).

use crate::containers::IndexedSet;
use crate::instance::Instance;
use crate::types::{Cost, SetId};

/// Sort sets by `cost / |elements|` ascending and accumulate until every
/// element is covered, crediting the last set only with the fractional
/// cost needed to cover the remaining elements.
pub fn trivial_bound(instance: &Instance) -> Cost {
    let mut sorted_sets: Vec<SetId> = (0..instance.number_of_sets()).collect();
    sorted_sets.sort_by(|&a, &b| {
        let set_a = instance.set(a);
        let set_b = instance.set(b);
        (set_a.cost * set_b.elements.len() as Cost).cmp(&(set_b.cost * set_a.elements.len() as Cost))
    });

    let mut bound: Cost = 0;
    let mut remaining = instance.number_of_elements();
    for set_id in sorted_sets {
        let set = instance.set(set_id);
        if remaining == 0 {
            break;
        }
        if set.elements.len() <= remaining {
            bound += set.cost;
            remaining -= set.elements.len();
        } else {
            bound += (set.cost * remaining as Cost - 1) / set.elements.len() as Cost + 1;
            remaining = 0;
        }
    }
    bound
}

/// Build the "2-cover" graph (sets joined by an element covered by
/// exactly those two sets), partition it into cliques by a greedy
/// largest-fit heuristic, and sum the cost of all but the most expensive
/// set of every clique.
///
/// Only the non-coloring greedy clique-partition branch of the original
/// is implemented; see `DESIGN.md` for why the graph-coloring variant is
/// out of scope here.
pub fn clique_cover_bound(instance: &Instance) -> Cost {
    if instance.number_of_elements() == 0 {
        return 0;
    }

    let number_of_sets = instance.number_of_sets();
    let mut number_of_2_neighbours = vec![0usize; number_of_sets];
    for element in instance.elements() {
        if element.sets.len() == 2 {
            number_of_2_neighbours[element.sets[0]] += 1;
            number_of_2_neighbours[element.sets[1]] += 1;
        }
    }

    let mut sorted_sets: Vec<SetId> = (0..number_of_sets)
        .filter(|&set_id| number_of_2_neighbours[set_id] > 0)
        .collect();
    sorted_sets.sort_by_key(|&set_id| number_of_2_neighbours[set_id]);

    let mut set_neighbours = IndexedSet::new(number_of_sets);
    let mut cliques: Vec<Vec<SetId>> = Vec::new();
    for set_id in sorted_sets {
        set_neighbours.clear();
        for &element_id in &instance.set(set_id).elements {
            let element = instance.element(element_id);
            if element.sets.len() != 2 {
                continue;
            }
            let other = if element.sets[0] == set_id {
                element.sets[1]
            } else {
                element.sets[0]
            };
            set_neighbours.add(other);
        }

        let best_clique = cliques
            .iter()
            .enumerate()
            .filter(|(_, clique)| clique.iter().all(|&member| set_neighbours.contains(member)))
            .max_by_key(|(_, clique)| clique.len())
            .map(|(index, _)| index);

        match best_clique {
            Some(index) => cliques[index].push(set_id),
            None => cliques.push(vec![set_id]),
        }
    }

    let mut bound: Cost = 0;
    for clique in &cliques {
        let maximum_cost_set = clique
            .iter()
            .copied()
            .max_by_key(|&set_id| instance.set(set_id).cost)
            .expect("clique is never empty");
        for &set_id in clique {
            if set_id != maximum_cost_set {
                bound += instance.set(set_id).cost;
            }
        }
    }
    bound
}

#[cfg(test)]
#[path = "../tests_unit/algorithms/bounds.rs"]
mod tests;
