//! Authored mazes shipped with the game.

pub(crate) const FIRST: &[&str] = &[
    "0100000000",
    "0101101010",
    "0001001010",
    "1101010010",
    "0001001010",
    "0110110100",
    "0000101011",
    "0111000000",
    "0100010110",
    "0001010019",
];

pub(crate) const SECOND: &[&str] = &[
    "010000100000000",
    "010110001111110",
    "000100100000010",
    "010011010111010",
    "001000011000100",
    "101111000010001",
    "000000101001110",
    "011110010011000",
    "010001001000010",
    "000101101011119",
];

pub(crate) const THIRD: &[&str] = &[
    "000010001000000",
    "011000100011010",
    "000101001110010",
    "111101010000110",
    "000001001001000",
    "011010110111010",
    "001000001000111",
    "101111010010000",
    "001001010101110",
    "000011100100010",
    "110100101011010",
    "000110100000010",
    "011000111110010",
    "010010100000100",
    "000100001010019",
];

pub(crate) const FOURTH: &[&str] = &[
    "000000000000000000000000000000",
    "011111111111111111111111111110",
    "010000000000000000000000000010",
    "010111101111111111111111111010",
    "010100100000001000000100001010",
    "010101111111101011110101101010",
    "010101000101000000010001001010",
    "010101010101011111011111011010",
    "010101010101000010010001001010",
    "010001010101011011110101101010",
    "011111010001011001000100001010",
    "010001011111010101011111111010",
    "010101000100010001010010001010",
    "010101110100100101011000101010",
    "010100010110101001001110101010",
    "010101010010119110101000101010",
    "010101011010000100001010100010",
    "010101000011111111111011111010",
    "010101110001000000001010001010",
    "010100011101101111101011101010",
    "010101010101001000101010001010",
    "010101000101010110101010101010",
    "010101111101010010101010101010",
    "010101000001000100100010101010",
    "010101011111010101111111101010",
    "010100000000010000000000001010",
    "010111111111111111111011101010",
    "010000000000000000000010000010",
    "011101111111111111111111111110",
    "000100000000000000000000000000",
];

pub(crate) const ALL: [&[&str]; 4] = [FIRST, SECOND, THIRD, FOURTH];
