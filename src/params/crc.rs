use super::{ensure_byte_multiple, ensure_fits, width_mask, Standard};
use crate::error::Result;
use std::fmt;

parameter_set! {
    /// Configuration of a table-driven CRC.
    ///
    /// Follows the Rocksoft model: register width, generator polynomial
    /// (top bit implied), initial register value, input/output reflection and
    /// a final XOR.
    pub struct CrcParameters {
        /// Register width in bits
        order: u32,
        /// Generator polynomial without its implied top bit
        polynomial: u64,
        /// Register value before the first byte
        initial: u64,
        /// Process input bytes least-significant bit first
        reflect_in: bool,
        /// Reflect the register before the final XOR
        reflect_out: bool,
        /// Value XORed into the final register
        xor_out: u64,
    }
}

impl CrcParameters {
    /// Validate and build a CRC configuration
    pub fn new(
        order: u32,
        polynomial: u64,
        initial: u64,
        reflect_in: bool,
        reflect_out: bool,
        xor_out: u64,
    ) -> Result<Self> {
        ensure_byte_multiple("CRC", order)?;
        ensure_fits("CRC polynomial", polynomial, order)?;
        ensure_fits("CRC initial value", initial, order)?;
        ensure_fits("CRC xor-out value", xor_out, order)?;
        Ok(Self::unchecked(order, polynomial, initial, reflect_in, reflect_out, xor_out))
    }

    /// All-ones mask of the register width
    pub fn mask(&self) -> u64 {
        width_mask(self.order)
    }
}

impl fmt::Display for CrcParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.order / 4) as usize;
        write!(
            f,
            "CRC-{} poly=0x{:0w$X} init=0x{:0w$X} refin={} refout={} xorout=0x{:0w$X}",
            self.order,
            self.polynomial,
            self.initial,
            self.reflect_in,
            self.reflect_out,
            self.xor_out,
            w = digits
        )
    }
}

standards! {
    /// Published CRC configurations.
    pub enum CrcStandard: CrcParameters {
        Crc8 = "CRC-8" (8, 0x07, 0x00, false, false, 0x00),
        Crc8Icode = "CRC-8-ICODE" (8, 0x1D, 0xFD, false, false, 0x00),
        Crc8Itu = "CRC-8-ITU" (8, 0x07, 0x00, false, false, 0x55),
        Crc8Maxim = "CRC-8-MAXIM" (8, 0x31, 0x00, true, true, 0x00),
        Crc8Wcdma = "CRC-8-WCDMA" (8, 0x9B, 0x00, true, true, 0x00),
        Crc16 = "CRC-16" (16, 0x8005, 0x0000, true, true, 0x0000),
        Crc16Ccitt = "CRC-16-CCITT" (16, 0x1021, 0x0000, true, true, 0x0000),
        Crc16CcittFalse = "CRC-16-CCITT-FALSE" (16, 0x1021, 0xFFFF, false, false, 0x0000),
        Crc16Maxim = "CRC-16-MAXIM" (16, 0x8005, 0x0000, true, true, 0xFFFF),
        Crc16Usb = "CRC-16-USB" (16, 0x8005, 0xFFFF, true, true, 0xFFFF),
        Crc16X25 = "CRC-16-X25" (16, 0x1021, 0xFFFF, true, true, 0xFFFF),
        Crc16Xmodem = "CRC-16-XMODEM" (16, 0x1021, 0x0000, false, false, 0x0000),
        Crc16Xkermit = "CRC-16-XKERMIT" (16, 0x8408, 0x0000, true, true, 0x0000),
        Crc24 = "CRC-24" (24, 0x864CFB, 0xB704CE, false, false, 0x000000),
        Crc32 = "CRC-32" (32, 0x04C11DB7, 0xFFFFFFFF, true, true, 0xFFFFFFFF),
        Crc32Bzip2 = "CRC-32-BZIP2" (32, 0x04C11DB7, 0xFFFFFFFF, false, false, 0xFFFFFFFF),
        Crc32Iscsi = "CRC-32-ISCSI" (32, 0x1EDC6F41, 0xFFFFFFFF, true, true, 0xFFFFFFFF),
        Crc32Jam = "CRC-32-JAM" (32, 0x04C11DB7, 0xFFFFFFFF, true, true, 0x00000000),
        Crc32Posix = "CRC-32-POSIX" (32, 0x04C11DB7, 0x00000000, false, false, 0xFFFFFFFF),
        Crc32Mpeg2 = "CRC-32-MPEG2" (32, 0x04C11DB7, 0xFFFFFFFF, false, false, 0x00000000),
        Crc64 = "CRC-64" (64, 0x42F0E1EBA9EA3693, 0, false, false, 0),
        Crc64We = "CRC-64-WE" (64, 0x42F0E1EBA9EA3693, u64::MAX, false, false, u64::MAX),
        Crc64Iso = "CRC-64-ISO" (64, 0x000000000000001B, u64::MAX, true, true, u64::MAX),
        Crc64Jones = "CRC-64-JONES" (64, 0xAD93D23594C93659, u64::MAX, true, true, 0),
    }
    aliases {
        Crc16Arc = "CRC-16-ARC" => Crc16,
        Crc16Ibm = "CRC-16-IBM" => Crc16,
        Crc16Lha = "CRC-16-LHA" => Crc16,
        Crc16Kermit = "CRC-16-KERMIT" => Crc16Ccitt,
        Crc16Zmodem = "CRC-16-ZMODEM" => Crc16Xmodem,
        Crc24OpenPgp = "CRC-24-OPENPGP" => Crc24,
        Crc32Pkzip = "CRC-32-PKZIP" => Crc32,
        Crc32Itu = "CRC-32-ITU" => Crc32,
        Crc32Cksum = "CRC-32-CKSUM" => Crc32Posix,
    }
}

impl Default for CrcStandard {
    fn default() -> Self {
        CrcStandard::Crc32
    }
}

impl CrcStandard {
    /// Result of hashing the ASCII string `"123456789"`, where published
    pub fn check_value(self) -> Option<u64> {
        use CrcStandard::*;
        let value = match self.canonical() {
            Crc8 => 0xF4,
            Crc8Icode => 0x7E,
            Crc8Itu => 0xA1,
            Crc8Maxim => 0xA1,
            Crc8Wcdma => 0x25,
            Crc16 => 0xBB3D,
            Crc16Ccitt => 0x2189,
            Crc16CcittFalse => 0x29B1,
            Crc16Maxim => 0x44C2,
            Crc16Usb => 0xB4C8,
            Crc16X25 => 0x906E,
            Crc16Xmodem => 0x31C3,
            Crc24 => 0x21CF02,
            Crc32 => 0xCBF43926,
            Crc32Bzip2 => 0xFC891918,
            Crc32Iscsi => 0xE3069283,
            Crc32Jam => 0x340BC6D9,
            Crc32Posix => 0x765E7680,
            Crc32Mpeg2 => 0x0376E6E7,
            Crc64 => 0x6C40DF5F0B497347,
            Crc64We => 0x62EC59E3F1A4F00A,
            Crc64Iso => 0xB90956C775A41001,
            _ => return None,
        };
        Some(value)
    }
}
