//! Summary statistics over a task's detected persons

use serde::{Deserialize, Serialize};

use super::tasks::TaskTree;
use crate::infra::db::entities::Gender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
	pub person_num: u64,
	pub male_num: u64,
	pub female_num: u64,
	pub male_mean_age: i64,
	pub female_mean_age: i64,
}

/// Running age total for one gender
#[derive(Default)]
struct AgeSum {
	count: u64,
	total: i64,
}

impl AgeSum {
	fn add(&mut self, age: i32) {
		self.count += 1;
		self.total += i64::from(age);
	}

	/// Floor of the mean, 0 when nobody was counted
	fn mean(&self) -> i64 {
		if self.count == 0 {
			0
		} else {
			self.total.div_euclid(self.count as i64)
		}
	}
}

/// Count persons across every image of `task` and average their ages per
/// gender. Persons of unknown gender only count toward `person_num`.
pub fn compute(task: &TaskTree) -> Statistics {
	let mut person_num = 0;
	let mut male = AgeSum::default();
	let mut female = AgeSum::default();

	for person in task.images.iter().flat_map(|image| &image.persons) {
		person_num += 1;
		match person.gender {
			Gender::Male => male.add(person.age),
			Gender::Female => female.add(person.age),
			Gender::Unknown => {}
		}
	}

	Statistics {
		person_num,
		male_num: male.count,
		female_num: female.count,
		male_mean_age: male.mean(),
		female_mean_age: female.mean(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ops::tasks::{ImageNode, PersonView};
	use pretty_assertions::assert_eq;

	fn person(gender: Gender, age: i32) -> PersonView {
		PersonView {
			gender,
			age,
			bbox_height: 1,
			bbox_width: 1,
			bbox_x: 0,
			bbox_y: 0,
		}
	}

	fn task(images: Vec<Vec<PersonView>>) -> TaskTree {
		TaskTree {
			id: 1,
			images: images
				.into_iter()
				.enumerate()
				.map(|(i, persons)| ImageNode {
					id: i as i32 + 1,
					name: format!("image {i}"),
					persons,
				})
				.collect(),
		}
	}

	#[test]
	fn empty_task_has_zero_statistics() {
		assert_eq!(compute(&task(vec![])), Statistics::default());
		assert_eq!(compute(&task(vec![vec![], vec![]])), Statistics::default());
	}

	#[test]
	fn mean_age_is_floored() {
		let stats = compute(&task(vec![vec![
			person(Gender::Male, 30),
			person(Gender::Male, 31),
		]]));

		assert_eq!(
			stats,
			Statistics {
				person_num: 2,
				male_num: 2,
				female_num: 0,
				male_mean_age: 30,
				female_mean_age: 0,
			}
		);
	}

	#[test]
	fn counts_across_images() {
		let stats = compute(&task(vec![
			vec![person(Gender::Female, 20), person(Gender::Male, 40)],
			vec![person(Gender::Female, 25)],
			vec![],
			vec![person(Gender::Male, 51), person(Gender::Female, 31)],
		]));

		assert_eq!(stats.person_num, 5);
		assert_eq!(stats.male_num + stats.female_num, stats.person_num);
		assert_eq!(stats.male_num, 2);
		assert_eq!(stats.female_num, 3);
		assert_eq!(stats.male_mean_age, 45);
		assert_eq!(stats.female_mean_age, 25);
	}

	#[test]
	fn unknown_gender_only_counts_toward_total() {
		let stats = compute(&task(vec![vec![
			person(Gender::Unknown, 90),
			person(Gender::Female, 10),
		]]));

		assert_eq!(stats.person_num, 2);
		assert_eq!(stats.male_num, 0);
		assert_eq!(stats.female_num, 1);
		assert_eq!(stats.male_mean_age, 0);
		assert_eq!(stats.female_mean_age, 10);
	}

	#[test]
	fn order_does_not_matter() {
		let images = vec![
			vec![person(Gender::Male, 33), person(Gender::Female, 18)],
			vec![person(Gender::Male, 60)],
			vec![person(Gender::Female, 47), person(Gender::Male, 2)],
		];
		let expected = compute(&task(images.clone()));

		let mut reversed: Vec<Vec<PersonView>> = images
			.iter()
			.map(|persons| persons.iter().rev().cloned().collect())
			.collect();
		reversed.reverse();
		assert_eq!(compute(&task(reversed)), expected);

		let flattened = vec![images.into_iter().flatten().collect()];
		assert_eq!(compute(&task(flattened)), expected);
	}
}
