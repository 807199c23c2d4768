/// CRC-16/MODBUS as used by the ILC firmware self-check.
pub struct Crc16Modbus {
    crc: u16,
}

impl Crc16Modbus {
    const POLY: u16 = 0xA001;
    const INIT: u16 = 0xFFFF;

    pub fn new() -> Self {
        Self { crc: Self::INIT }
    }

    pub fn reset(&mut self) {
        self.crc = Self::INIT;
    }

    pub fn append(&mut self, data: &[u8]) {
        for &byte in data {
            self.crc ^= byte as u16;

            for _ in 0..8 {
                self.crc = if (self.crc & 0x0001) != 0 {
                    (self.crc >> 1) ^ Self::POLY
                } else {
                    self.crc >> 1
                };
            }
        }
    }

    pub fn checksum(&self) -> u16 {
        self.crc
    }

    pub fn modbus(data: &[u8]) -> u16 {
        let mut c = Self::new();
        c.append(data);
        c.checksum()
    }
}

impl Default for Crc16Modbus {
    fn default() -> Self {
        Self::new()
    }
}
