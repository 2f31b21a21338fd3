// src/apps.rs
// Known-app list backing the frontend dropdown. Display name → Google Play
// package. Apps on other stores are addressed by pasted URL instead.

pub const KNOWN_APPS: &[(&str, &str)] = &[
    ("ABC Kids: Tracing & Phonics", "com.rvappstudios.abc_kids_toddler_tracing_phonics"),
    ("Spelling & Phonics: Kids Games", "com.rvappstudios.abc.spelling.toddler.spell.phonics"),
    ("123 Numbers - Count & Tracing", "com.rvappstudios.numbers123.toddler.counting.tracing"),
    ("Puzzle Kids: Jigsaw Puzzles", "com.rvappstudios.jigsaw.puzzles.kids"),
    ("Math Kids: Math Games For Kids", "com.rvappstudios.math.kids.counting"),
    ("Color Kids: Coloring Games", "com.rvappstudios.shapes.colors.toddler"),
    ("Kids Multiplication Math Games", "com.rvappstudios.kids.multiplication.games.multiply.math"),
    ("Baby Games: Piano & Baby Phone", "com.rvappstudios.baby.games.piano.phone.kids"),
    ("Coloring Games: Color & Paint", "com.rvappstudios.kids.coloring.book.color.painting"),
    ("Learn to Read: Kids Games", "com.rvappstudios.sight.words.phonics.reading.kids.games"),
    ("Math Games: Math for Kids", "com.rvappstudios.math.games.kids.addition.subtraction.multiplication.division"),
    ("Kids Math: Math Games for Kids", "com.rvappstudios.montessori.math.games.kids.number.counting"),
    ("Drawing Games: Draw & Color", "com.rvappstudios.kids.drawing.games.coloring.book.paint"),
    ("Kids Games: For Toddlers 3-5", "com.rvappstudios.baby.toddler.kids.games.learning.activity"),
    ("Kids Toddler & Preschool Games", "com.rvappstudios.toddler.preschool.kids.learning.games"),
    ("Baby Phone & Kids Games", "com.rvappstudios.baby.phone.kids.games.toddler.learning.apps.lucas.and.friends"),
    ("Kids Music: Piano, Xylo, Drums", "com.rvappstudios.kids.games.music.baby.piano.songs.lucas.and.friends"),
];

/// Resolve a dropdown label to its package. Exact match only; identifier
/// strings that are not labels pass through the CLI untouched.
pub fn package_for(label: &str) -> Option<&'static str> {
    KNOWN_APPS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, pkg)| *pkg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_resolves_to_package() {
        assert_eq!(
            package_for("Puzzle Kids: Jigsaw Puzzles"),
            Some("com.rvappstudios.jigsaw.puzzles.kids")
        );
        assert_eq!(package_for("No Such App"), None);
    }
}
